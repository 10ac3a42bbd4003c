//! Common utility functions shared across the codebase.

/// Title-case a hyphen-separated slug.
///
/// # Examples
///
/// ```
/// use vreg::utils::to_title;
///
/// assert_eq!(to_title("chat-message"), "Chat Message");
/// assert_eq!(to_title("useHelloWorld"), "UseHelloWorld");
/// ```
pub fn to_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a package specifier to its package root.
///
/// Scoped packages keep two segments, everything else keeps one.
///
/// # Examples
///
/// ```
/// use vreg::utils::base_package_name;
///
/// assert_eq!(base_package_name("lodash/debounce"), "lodash");
/// assert_eq!(base_package_name("@vueuse/core/dist/index"), "@vueuse/core");
/// ```
pub fn base_package_name(specifier: &str) -> &str {
    if specifier.starts_with('@') {
        match specifier.match_indices('/').nth(1) {
            Some((idx, _)) => &specifier[..idx],
            None => specifier,
        }
    } else {
        specifier.split('/').next().unwrap_or(specifier)
    }
}

/// Directory part of a forward-slash path (`""` for a bare file name).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Join `rel` onto `dir` with ordinary `.`/`..` semantics on forward-slash paths.
///
/// Purely textual: the filesystem is never consulted. `..` segments that would
/// climb above the root are kept so the result never silently aliases another path.
pub fn join_normalized(dir: &str, rel: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Strip the final extension from a file name (`Foo.vue` -> `Foo`).
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Convert an OS path fragment into the forward-slash form used in item documents.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
