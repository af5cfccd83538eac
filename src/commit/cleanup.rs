// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Message cleanup mirroring `git commit --cleanup=strip`.

/// Marker line below which an editor buffer is discarded by git.
pub const SCISSORS_LINE: &str = "# ------------------------ >8 ------------------------";

/// Normalize a raw message the way git does before storing it.
///
/// Drops the scissors line and everything below it, `#` comment lines,
/// trailing whitespace on every line, and leading/trailing blank lines.
pub fn cleanup(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if line.trim_end() == SCISSORS_LINE {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        lines.push(line.trim_end_matches([' ', '\t', '\r']));
    }

    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);

    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_strips_comments() {
        let raw = "feat: add parser\n# Please enter the commit message\n\nBody text\n";
        assert_eq!(cleanup(raw), "feat: add parser\n\nBody text");
    }

    #[test]
    fn test_cleanup_scissors() {
        let raw = format!(
            "fix: handle null\n\nDetails\n{}\ndiff --git a/x b/x\n+line\n",
            SCISSORS_LINE
        );
        assert_eq!(cleanup(&raw), "fix: handle null\n\nDetails");
    }

    #[test]
    fn test_cleanup_trailing_whitespace_and_blank_lines() {
        let raw = "\n\n  \nfeat: add x  \t\n\nbody   \n\n\n";
        assert_eq!(cleanup(raw), "feat: add x\n\nbody");
    }

    #[test]
    fn test_cleanup_keeps_inner_blank_lines() {
        let raw = "feat: add x\n\n\nbody";
        assert_eq!(cleanup(raw), "feat: add x\n\n\nbody");
    }

    #[test]
    fn test_cleanup_crlf() {
        assert_eq!(cleanup("feat: add x\r\n\r\nbody\r\n"), "feat: add x\n\nbody");
    }

    #[test]
    fn test_cleanup_empty() {
        assert_eq!(cleanup(""), "");
        assert_eq!(cleanup("# only a comment\n"), "");
    }
}
