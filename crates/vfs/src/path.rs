//! Syntactic path handling for the virtual tree. Nothing here checks existence.

pub const ROOT: &str = "/";
pub const HOME: &str = "/home";

/// Split a path into its non-empty `/`-separated segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Canonical absolute form: leading slash, no empty segments, no trailing slash.
pub fn normalize(path: &str) -> String {
    let parts = segments(path);
    if parts.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

pub fn is_root(path: &str) -> bool {
    segments(path).is_empty()
}

/// Resolve `raw` against the current directory.
pub fn resolve(raw: &str, current: &str) -> String {
    if raw.starts_with('/') {
        return raw.to_string();
    }

    match raw {
        "~" => HOME.to_string(),
        "." => current.to_string(),
        ".." => {
            let parts = segments(current);
            match parts.split_last() {
                Some((_, parent)) if !parent.is_empty() => format!("/{}", parent.join("/")),
                _ => ROOT.to_string(),
            }
        }
        _ => join(current, raw),
    }
}

/// Append a child name to a directory path without doubling the root slash.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Split an absolute path into `(parent, name)`. The root has neither.
pub fn parent_and_name(path: &str) -> Option<(String, String)> {
    let parts = segments(path);
    let (name, parent) = parts.split_last()?;
    let parent = if parent.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", parent.join("/"))
    };
    Some((parent, name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absolute_unchanged() {
        assert_eq!(resolve("/system/config", "/home"), "/system/config");
        assert_eq!(resolve("/", "/home/programs"), "/");
    }

    #[test]
    fn test_special_names() {
        assert_eq!(resolve("~", "/home/programs/games"), "/home");
        assert_eq!(resolve(".", "/home/programs"), "/home/programs");
        assert_eq!(resolve("..", "/home/programs"), "/home");
        assert_eq!(resolve("..", "/home"), "/");
        assert_eq!(resolve("..", "/"), "/");
    }

    #[test]
    fn test_relative_join() {
        assert_eq!(resolve("home", "/"), "/home");
        assert_eq!(resolve("programs", "/home"), "/home/programs");
        assert_eq!(resolve("games/tetris", "/home/programs"), "/home/programs/games/tetris");
    }

    #[test]
    fn test_parent_and_name() {
        assert_eq!(
            parent_and_name("/home/documents/readme.txt"),
            Some(("/home/documents".to_string(), "readme.txt".to_string()))
        );
        assert_eq!(parent_and_name("/home"), Some(("/".to_string(), "home".to_string())));
        assert_eq!(parent_and_name("/"), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("//home//programs/"), "/home/programs");
    }

    proptest! {
        #[test]
        fn prop_relative_name_never_doubles_slash(name in "[a-z_]{1,12}", depth in 0usize..4) {
            let current = if depth == 0 {
                ROOT.to_string()
            } else {
                format!("/{}", vec!["dir"; depth].join("/"))
            };
            let resolved = resolve(&name, &current);
            prop_assert!(!resolved.contains("//"));
            prop_assert!(resolved.ends_with(&name));
            prop_assert_eq!(resolve("..", &resolved), current);
        }
    }
}
