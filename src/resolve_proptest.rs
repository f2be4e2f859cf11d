//! Property-based tests for import path resolution and the manifest.
//!
//! These tests use proptest to generate import paths and manifests and check
//! that resolution and encoding invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::manifest::{Dependency, Manifest};
    use crate::metadata::NoMetadata;
    use crate::mock_runner::MockRunner;
    use crate::repository::VcsEnv;
    use crate::resolve::Resolver;
    use crate::vcs::Backend;
    use proptest::prelude::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn resolver() -> (TempDir, Arc<MockRunner>, Resolver) {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(MockRunner::new());
        let env = VcsEnv::new(runner.clone(), root.path().join("src"));
        let resolver = Resolver::new(env, Box::new(NoMetadata)).unwrap();
        (root, runner, resolver)
    }

    fn segment() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_.-]{1,12}"
    }

    fn dependency() -> impl Strategy<Value = Dependency> {
        (
            "[a-z]{1,8}\\.(com|org|net)(/[a-z0-9]{1,8}){1,3}",
            "[0-9a-f]{40}",
            "[a-z]{0,8}",
            "(/[a-z]{1,8}){0,2}",
        )
            .prop_map(|(importpath, revision, branch, path)| Dependency {
                repository: format!("https://{}", importpath),
                importpath,
                revision,
                branch,
                path,
            })
    }

    // ============================================================================
    // import path shape
    // ============================================================================

    proptest! {
        /// Property: a path without a dotted host is rejected before any tool runs
        #[test]
        fn undotted_host_is_rejected_without_tools(
            host in "[a-z0-9-]{1,12}",
            rest in "(/[a-z0-9]{1,8}){1,3}",
        ) {
            let (_root, runner, resolver) = resolver();
            let path = format!("{}{}", host, rest);

            let result = resolver.resolve(&path);

            prop_assert!(
                matches!(result, Err(Error::InvalidPath { .. })),
                "{:?} should be rejected as an invalid import path",
                path
            );
            prop_assert!(runner.calls().is_empty());
        }

        /// Property: whitespace anywhere in a path makes it invalid
        #[test]
        fn whitespace_is_rejected_without_tools(
            owner in "[a-z]{1,8}",
            left in "[a-z]{0,4}",
            right in "[a-z]{0,4}",
        ) {
            let (_root, runner, resolver) = resolver();
            let path = format!("github.com/{}/{} {}", owner, left, right);

            prop_assert!(!resolver.is_valid_import_path(&path));
            let rejected = matches!(resolver.resolve(&path), Err(Error::InvalidPath { .. }));
            prop_assert!(rejected, "{:?} should be rejected as an invalid import path", path);
            prop_assert!(runner.calls().is_empty());
        }

        // ============================================================================
        // github derivation
        // ============================================================================

        /// Property: github paths resolve to git with the owner/project URL and the rest as sub-path
        #[test]
        fn github_url_and_sub_path(
            owner in segment(),
            project in segment(),
            extra in proptest::collection::vec(segment(), 0..4),
        ) {
            let (_root, runner, resolver) = resolver();
            let sub: String = extra.iter().map(|s| format!("/{}", s)).collect();
            let path = format!("github.com/{}/{}{}", owner, project, sub);

            let (repo, got) = resolver.resolve(&path).unwrap();

            prop_assert_eq!(repo.backend(), Backend::Git);
            prop_assert_eq!(repo.url(), format!("https://github.com/{}/{}", owner, project));
            prop_assert_eq!(got, sub);
            prop_assert_eq!(runner.calls().len(), 1);
        }
    }

    // ============================================================================
    // manifest encoding
    // ============================================================================

    proptest! {
        /// Property: any manifest decodes to itself after encoding, order preserved
        #[test]
        fn manifest_round_trips(deps in proptest::collection::vec(dependency(), 0..6)) {
            let mut manifest = Manifest::new();
            for dep in deps {
                if !manifest.has_importpath(&dep.importpath) {
                    manifest.add_dependency(dep).unwrap();
                }
            }

            let mut buf = Vec::new();
            manifest.to_writer(&mut buf).unwrap();
            let decoded = Manifest::from_reader(&buf[..]).unwrap();

            prop_assert_eq!(decoded, manifest);
        }
    }
}
