//! Resolution contract tests
//!
//! These tests define terminal, root and remainder for a fixed graph, and
//! the exact failure messages callers may show to users.

// ===== Failure Messages =====
#[allow(dead_code)]
const MESSAGE_OFFLINE: &str =
    "this action must be run in online mode, try running 'ipfs daemon' first";
#[allow(dead_code)]
const MESSAGE_UNSUPPORTED_PREFIX: &str = "unsupported path namespace: ";

// ===== Contract Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use gateway_path::{Path, ResolvedPath};
    use gateway_resolver::{resolve_path, FailureClass, ResolveError, OFFLINE_PHRASE};
    use gateway_session::NameError;
    use lifecycle::RequestContext;

    #[test]
    fn test_resolution_table() {
        let f = fixture();
        let cx = RequestContext::background();

        let cases = [
            (Path::ipfs(&f.root), f.root, ""),
            (Path::ipfs(&f.root).join(&["docs"]), f.docs, ""),
            (Path::ipfs(&f.root).join(&["docs", "readme"]), f.readme, ""),
            (Path::ipfs(&f.root).join(&["meta", "version"]), f.root, "meta/version"),
            (Path::ipfs(&f.root).join(&["docs", "missing", "x"]), f.docs, "missing/x"),
            (Path::ipld(&f.root).join(&["docs", "readme", "deeper"]), f.readme, "deeper"),
        ];

        for (path, terminal, remainder) in cases {
            let resolved = resolve_path(&f.api, &cx, path.clone())
                .unwrap_or_else(|err| panic!("Resolving {} failed: {}", path, err));
            assert_eq!(resolved.terminal_id(), &terminal, "Terminal of {} changed", path);
            assert_eq!(resolved.root_id(), &f.root, "Root of {} changed", path);
            assert_eq!(resolved.remainder(), remainder, "Remainder of {} changed", path);
            assert_eq!(resolved.as_path(), &path);
        }
    }

    #[test]
    fn test_resolved_shortcut_contract() {
        let f = fixture();
        let resolved = ResolvedPath::ipld(f.docs);
        assert_eq!(resolved.to_string(), format!("/ipld/{}", f.docs));
        assert_eq!(resolved.terminal_id(), resolved.root_id());
        assert_eq!(resolved.remainder(), "");

        let again = resolve_path(&f.api, &RequestContext::background(), resolved.clone()).unwrap();
        assert_eq!(again, resolved);
        assert_eq!(f.api.store().load_count(), 0);
    }

    #[test]
    fn test_offline_message_contract() {
        let f = fixture();
        let api = f.api.with_name_failure(
            "/ipns/example.com",
            NameError::Backend(format!("routing: {}", OFFLINE_PHRASE)),
        );

        let err = resolve_path(&api, &RequestContext::background(), "/ipns/example.com/docs")
            .unwrap_err();
        assert_eq!(err.to_string(), MESSAGE_OFFLINE);
        assert_eq!(err.class(), FailureClass::Offline);
    }

    #[test]
    fn test_unsupported_namespace_message_contract() {
        let f = fixture();
        let err = resolve_path(&f.api, &RequestContext::background(), "/foo/bar").unwrap_err();
        assert_eq!(err, ResolveError::UnsupportedNamespace("foo".to_string()));
        assert_eq!(err.to_string(), format!("{}foo", MESSAGE_UNSUPPORTED_PREFIX));
    }

    #[test]
    fn test_name_redirect_contract() {
        let f = fixture();
        let root = f.root;
        let api = f.api.with_name("/ipns/example.com", Path::ipfs(&root).to_string());

        let resolved =
            resolve_path(&api, &RequestContext::background(), "/ipns/example.com/docs").unwrap();
        assert_eq!(resolved.terminal_id(), &f.docs);
        assert_eq!(resolved.root_id(), &root);
        assert!(!resolved.as_path().is_mutable());
    }
}
