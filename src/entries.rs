//! Directory-style enumeration over a module's flat resource-name index.
//!
//! Module content has no real directory tree; names like `a/c/d.txt` are
//! flat keys and hierarchy is inferred from `/`-separated prefixes. This
//! module filters an ordered name sequence down to the direct children of a
//! queried path, much like `ls` on a directory.

use std::iter::Fuse;

/// Path separator used in resource names.
pub const SEPARATOR: char = '/';

/// Enumerate the direct children of `path` within `names`.
///
/// `path` is normalized first: one leading separator is stripped, and a
/// trailing separator is appended when the (possibly now empty) path is
/// non-empty and lacks one. The empty string queries the root.
///
/// The result is lazy with a single buffered lookahead element, single-pass,
/// and preserves the relative order of `names`. It never yields the queried
/// path itself and never yields anything deeper than a direct child;
/// directory entries keep their trailing separator.
pub fn entry_paths<I>(names: I, path: &str) -> EntryPaths<I::IntoIter>
where
    I: IntoIterator<Item = String>,
{
    let mut normalized = path.strip_prefix(SEPARATOR).unwrap_or(path).to_string();
    if !normalized.is_empty() && !normalized.ends_with(SEPARATOR) {
        normalized.push(SEPARATOR);
    }
    let mut paths = EntryPaths {
        names: names.into_iter().fuse(),
        path: normalized,
        next: None,
    };
    paths.next = paths.find_next();
    paths
}

/// Lazy iterator returned by [`entry_paths`].
pub struct EntryPaths<I: Iterator<Item = String>> {
    names: Fuse<I>,
    path: String,
    next: Option<String>,
}

impl<I: Iterator<Item = String>> EntryPaths<I> {
    fn find_next(&mut self) -> Option<String> {
        for name in self.names.by_ref() {
            if name == self.path || !name.starts_with(&self.path) {
                continue;
            }
            // A direct child has no further separator after the queried
            // prefix, except as its own last character (a child directory).
            match name[self.path.len()..].find(SEPARATOR) {
                None => return Some(name),
                Some(idx) if self.path.len() + idx == name.len() - 1 => return Some(name),
                Some(_) => continue,
            }
        }
        None
    }
}

impl<I: Iterator<Item = String>> Iterator for EntryPaths<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let upcoming = self.find_next();
        std::mem::replace(&mut self.next, upcoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    fn collect(entries: &[&str], path: &str) -> Vec<String> {
        entry_paths(names(entries), path).collect()
    }

    const SCENARIO: &[&str] = &["a/", "a/b.txt", "a/c/", "a/c/d.txt"];

    #[test]
    fn test_direct_children_only() {
        assert_eq!(collect(SCENARIO, "a"), names(&["a/b.txt", "a/c/"]));
        assert_eq!(collect(SCENARIO, "a/c"), names(&["a/c/d.txt"]));
    }

    #[test]
    fn test_root_query() {
        assert_eq!(collect(SCENARIO, ""), names(&["a/"]));
    }

    #[test]
    fn test_leading_separator_is_normalized() {
        assert_eq!(collect(SCENARIO, "/a"), collect(SCENARIO, "a"));
        assert_eq!(collect(SCENARIO, "/"), collect(SCENARIO, ""));
    }

    #[test]
    fn test_trailing_separator_accepted() {
        assert_eq!(collect(SCENARIO, "a/"), collect(SCENARIO, "a"));
    }

    #[test]
    fn test_queried_path_excluded() {
        assert!(!collect(SCENARIO, "a").contains(&"a/".to_string()));
    }

    #[test]
    fn test_order_preserved() {
        let shuffled = &["a/c/", "a/zz", "a/b.txt"];
        assert_eq!(collect(shuffled, "a"), names(&["a/c/", "a/zz", "a/b.txt"]));
    }

    #[test]
    fn test_no_match() {
        assert!(collect(SCENARIO, "b").is_empty());
        assert!(collect(&[], "a").is_empty());
    }

    #[test]
    fn test_single_pass_lookahead() {
        let mut paths = entry_paths(names(SCENARIO), "a");
        assert_eq!(paths.next().as_deref(), Some("a/b.txt"));
        assert_eq!(paths.next().as_deref(), Some("a/c/"));
        assert_eq!(paths.next(), None);
        assert_eq!(paths.next(), None);
    }
}
