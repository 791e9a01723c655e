//! Stateless helpers for line splitting and field tokenizing.

use aho_corasick::AhoCorasick;

use crate::conf::C_ESCAPE_TAB;

/// Decode a configured separator token (`\t` becomes a tab).
pub fn derive_separator_token(raw: &str) -> String {
    raw.replace(C_ESCAPE_TAB, "\t")
}

/// Split decoded text into physical lines.
///
/// Recognises `\n`, `\r\n` and lone `\r`. A trailing terminator does not
/// produce an extra empty line.
pub fn split_physical_lines(text: &str) -> Vec<&str> {
    let v_bytes = text.as_bytes();
    let mut l_lines = Vec::new();
    let mut n_idx_start = 0;
    let mut n_idx = 0;

    while n_idx < v_bytes.len() {
        match v_bytes[n_idx] {
            b'\n' => {
                l_lines.push(&text[n_idx_start..n_idx]);
                n_idx += 1;
                n_idx_start = n_idx;
            }
            b'\r' => {
                l_lines.push(&text[n_idx_start..n_idx]);
                n_idx += 1;
                if v_bytes.get(n_idx) == Some(&b'\n') {
                    n_idx += 1;
                }
                n_idx_start = n_idx;
            }
            _ => n_idx += 1,
        }
    }

    if n_idx_start < v_bytes.len() {
        l_lines.push(&text[n_idx_start..]);
    }
    l_lines
}

/// Split one line on every separator match; empty fields are kept.
pub fn split_line(line: &str, matcher_separator: &AhoCorasick) -> Vec<String> {
    let mut l_items = Vec::new();
    let mut n_pos_start = 0;
    for mat in matcher_separator.find_iter(line) {
        l_items.push(line[n_pos_start..mat.start()].to_string());
        n_pos_start = mat.end();
    }
    l_items.push(line[n_pos_start..].to_string());
    l_items
}
