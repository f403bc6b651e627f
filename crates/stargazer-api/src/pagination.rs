// Link header parsing for GitHub's paginated endpoints

/// Pull the `rel="next"` target out of a `Link` header value
///
/// GitHub sends something like:
/// `<https://api.github.com/user/1/starred?page=2>; rel="next", <...>; rel="last"`
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });

        if !is_next {
            return None;
        }

        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(ToString::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_next_among_several_relations() {
        let header = "<https://api.github.com/user/9/starred?per_page=100&page=2>; rel=\"next\", \
                      <https://api.github.com/user/9/starred?per_page=100&page=7>; rel=\"last\"";

        assert_eq!(
            next_link(header),
            Some("https://api.github.com/user/9/starred?per_page=100&page=2".to_string())
        );
    }

    #[test]
    fn test_next_does_not_have_to_come_first() {
        let header = "<https://x/?page=1>; rel=\"prev\", <https://x/?page=3>; rel=\"next\"";
        assert_eq!(next_link(header), Some("https://x/?page=3".to_string()));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = "<https://x/?page=1>; rel=\"first\", <https://x/?page=4>; rel=\"prev\"";
        assert_eq!(next_link(header), None);
        assert_eq!(next_link(""), None);
    }
}
