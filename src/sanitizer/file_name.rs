/// Strips a user-supplied file name down to a safe subset.
///
/// Path separators (`/`, `\`) and every character other than ASCII word
/// characters, whitespace, `.` and `-` are removed, then the result is
/// trimmed. This prevents directory traversal through separators; it does
/// not guarantee the name is valid on every filesystem (`..` survives as a
/// plain name, reserved device names are not checked).
///
/// Applying it to its own output changes nothing.
///
/// ```
/// use request_guard::sanitizer::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("../../etc/passwd"), "....etcpasswd");
/// assert_eq!(sanitize_file_name(" report (final).pdf "), "report final.pdf");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|&c| is_allowed(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn removes_both_separator_styles() {
        assert_eq!(sanitize_file_name(r"C:\Users\me\notes.txt"), "CUsersmenotes.txt");
        assert_eq!(sanitize_file_name("a/b/c.txt"), "abc.txt");
    }

    #[test]
    fn removes_shell_and_null_characters() {
        assert_eq!(sanitize_file_name("rm -rf $HOME;\0.sh"), "rm -rf HOME.sh");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(sanitize_file_name("résumé.doc"), "rsum.doc");
    }

    #[test]
    fn all_rejected_yields_empty() {
        assert_eq!(sanitize_file_name("///\\\\"), "");
    }

    proptest! {
        #[test]
        fn sanitizing_is_idempotent(name in any::<String>()) {
            let once = sanitize_file_name(&name);
            let twice = sanitize_file_name(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn output_has_no_separators(name in any::<String>()) {
            let out = sanitize_file_name(&name);
            prop_assert!(!out.contains('/'));
            prop_assert!(!out.contains('\\'));
        }
    }
}
