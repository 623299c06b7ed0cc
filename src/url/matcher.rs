/// Finds the first host fragment contained anywhere in `netloc`
///
/// Matching is unanchored substring containment, not label-aware suffix
/// matching: `"cs.uci.edu"` matches `"www.cs.uci.edu"` but also
/// `"ics.uci.edu"` and `"cs.uci.edu.example.com"`.
///
/// # Examples
///
/// ```
/// use link_sieve::url::find_fragment;
///
/// let fragments = vec!["ics.uci.edu".to_string(), "stat.uci.edu".to_string()];
/// assert_eq!(find_fragment("www.ics.uci.edu", &fragments), Some("ics.uci.edu"));
/// assert_eq!(find_fragment("www.uci.edu", &fragments), None);
/// ```
pub fn find_fragment<'a>(netloc: &str, fragments: &'a [String]) -> Option<&'a str> {
    fragments
        .iter()
        .map(String::as_str)
        .find(|fragment| netloc.contains(fragment))
}

/// Returns the disallowed extension that `path` ends with, if any
///
/// `extensions` must already be lowercase; the path is lowercased here.
///
/// # Examples
///
/// ```
/// use link_sieve::url::disallowed_extension;
///
/// let extensions = vec!["pdf".to_string(), "zip".to_string()];
/// assert_eq!(disallowed_extension("/papers/Thesis.PDF", &extensions), Some("pdf"));
/// assert_eq!(disallowed_extension("/papers/index.html", &extensions), None);
/// ```
pub fn disallowed_extension<'a>(path: &str, extensions: &'a [String]) -> Option<&'a str> {
    let path = path.to_lowercase();
    let (_, suffix) = path.rsplit_once('.')?;
    extensions
        .iter()
        .map(String::as_str)
        .find(|extension| *extension == suffix)
}
