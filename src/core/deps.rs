//! Dependency classification.
//!
//! Import specifiers are sorted into external runtime packages, dev-only
//! packages, and references to other registry items. Matching is purely
//! textual: nothing is resolved against the filesystem or `node_modules`.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::Config;
use crate::core::types::{DependencySets, PackageJson};
use crate::utils::{base_package_name, join_normalized, parent_dir, strip_extension};

const TYPES_PREFIX: &str = "@types/";

// ============================================================
// Allow-lists
// ============================================================

/// Packages an item may declare, derived from the source packages' manifests.
#[derive(Debug, Clone, Default)]
pub struct AllowLists {
    pub runtime: HashSet<String>,
    pub dev: HashSet<String>,
    /// Runtime package root -> its `@types/` packages.
    pub types_map: BTreeMap<String, Vec<String>>,
}

impl AllowLists {
    /// Merge the manifests and subtract packages that never ship with an item:
    /// the framework itself and anything in the internal monorepo scope
    /// (runtime), plus the configured dev exclusions.
    pub fn from_packages(packages: &[PackageJson], config: &Config) -> Self {
        let internal_prefix = format!("{}/", config.internal_scope.trim_end_matches('/'));
        let is_internal =
            |name: &str| !config.internal_scope.is_empty() && name.starts_with(&internal_prefix);

        let runtime: HashSet<String> = packages
            .iter()
            .flat_map(|pkg| pkg.dependencies.keys())
            .filter(|name| name.as_str() != config.framework_package && !is_internal(name))
            .cloned()
            .collect();

        let dev: HashSet<String> = packages
            .iter()
            .flat_map(|pkg| pkg.dev_dependencies.keys())
            .filter(|name| !config.excluded_dev_dependencies.contains(name))
            .cloned()
            .collect();

        let types_map = build_types_map(dev.iter().map(String::as_str));

        Self {
            runtime,
            dev,
            types_map,
        }
    }
}

/// Map runtime packages to their DefinitelyTyped packages.
///
/// Scoped packages use the `__` separator: `@types/babel__core` types `@babel/core`.
pub fn build_types_map<'a>(dev_dependencies: impl Iterator<Item = &'a str>) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for dev_dep in dev_dependencies {
        let Some(name) = dev_dep.strip_prefix(TYPES_PREFIX) else {
            continue;
        };
        let runtime = match name.split_once("__") {
            Some((scope, rest)) => format!("@{}/{}", scope, rest),
            None => name.to_string(),
        };
        map.entry(runtime).or_default().push(dev_dep.to_string());
    }
    for packages in map.values_mut() {
        packages.sort();
    }
    map
}

/// Read a `package.json`. A missing or malformed manifest contributes nothing.
pub fn load_package_json(path: &Path) -> PackageJson {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "package manifest not readable");
            return PackageJson::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring malformed package manifest");
        PackageJson::default()
    })
}

// ============================================================
// Alias namespaces
// ============================================================

/// How a reference into a namespace is written into `registryDependencies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStyle {
    /// Bare slug, resolved by the consumer against the shared UI registry.
    Slug,
    /// `<baseUrl>/<slug>.json` in this registry.
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasNamespace {
    pub prefix: String,
    pub style: ReferenceStyle,
}

/// Internal alias roots, longest prefix first so nested namespaces win.
pub fn alias_namespaces(config: &Config) -> Vec<AliasNamespace> {
    let base = &config.base_name;
    let mut namespaces = vec![
        AliasNamespace {
            prefix: "@/components/ui/".to_string(),
            style: ReferenceStyle::Slug,
        },
        AliasNamespace {
            prefix: format!("@/components/{}/examples/", base),
            style: ReferenceStyle::Url,
        },
        AliasNamespace {
            prefix: format!("@/components/{}/", base),
            style: ReferenceStyle::Url,
        },
        AliasNamespace {
            prefix: "@/composables/".to_string(),
            style: ReferenceStyle::Url,
        },
        AliasNamespace {
            prefix: "@/lib/".to_string(),
            style: ReferenceStyle::Url,
        },
    ];
    namespaces.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    namespaces
}

/// Slug addressed by the part of a path after a namespace prefix.
///
/// Same rule as grouping: a nested path names its directory, a lone file
/// names itself without extension.
pub fn slug_from_rest(rest: &str) -> Option<&str> {
    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    let first = segments.next()?;
    if segments.next().is_some() {
        Some(first)
    } else {
        Some(strip_extension(first))
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
}

// ============================================================
// Classifier
// ============================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions<'a> {
    /// Canonical path of the importing file; relative specifiers need it.
    pub file_path: Option<&'a str>,
    /// Group name of the importing item, for self-reference elision.
    pub current_group: Option<&'a str>,
    /// Drop every internal reference (used for the bundle).
    pub skip_internal_deps: bool,
}

pub struct DependencyClassifier<'a> {
    allow: &'a AllowLists,
    namespaces: Vec<AliasNamespace>,
    base_url: String,
}

impl<'a> DependencyClassifier<'a> {
    pub fn new(allow: &'a AllowLists, config: &Config) -> Self {
        Self {
            allow,
            namespaces: alias_namespaces(config),
            base_url: config.base_url_trimmed().to_string(),
        }
    }

    pub fn classify(&self, specifiers: &[String], options: &ClassifyOptions<'_>) -> DependencySets {
        let mut deps = DependencySets::default();

        for specifier in specifiers {
            if is_relative(specifier) {
                if let Some(file_path) = options.file_path {
                    let candidate = join_normalized(parent_dir(file_path), specifier);
                    self.classify_alias(&format!("@/{}", candidate), options, &mut deps);
                }
                continue;
            }

            let aliased = match specifier.strip_prefix("~/") {
                Some(rest) => format!("@/{}", rest),
                None => specifier.clone(),
            };
            if self.classify_alias(&aliased, options, &mut deps) {
                continue;
            }

            self.classify_package(specifier, &mut deps);
        }

        deps
    }

    /// Returns true when `specifier` falls inside an internal namespace,
    /// whether or not it produced a reference.
    fn classify_alias(
        &self,
        specifier: &str,
        options: &ClassifyOptions<'_>,
        deps: &mut DependencySets,
    ) -> bool {
        let Some(namespace) = self
            .namespaces
            .iter()
            .find(|ns| specifier.starts_with(&ns.prefix))
        else {
            return false;
        };

        let Some(slug) = slug_from_rest(&specifier[namespace.prefix.len()..]) else {
            return true;
        };
        if options.current_group == Some(slug) || options.skip_internal_deps {
            return true;
        }

        match namespace.style {
            ReferenceStyle::Slug => deps.add_internal(slug),
            ReferenceStyle::Url => deps.add_internal(format!("{}/{}.json", self.base_url, slug)),
        }
        true
    }

    fn classify_package(&self, specifier: &str, deps: &mut DependencySets) {
        let root = base_package_name(specifier);
        if self.allow.runtime.contains(root) {
            deps.add_runtime(root);
            if let Some(type_packages) = self.allow.types_map.get(root) {
                for type_package in type_packages {
                    deps.add_dev(type_package.as_str());
                }
            }
        }

        if self.allow.dev.contains(specifier) {
            deps.add_dev(specifier);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn allow() -> AllowLists {
        let runtime = ["lodash", "@vueuse/core", "vue-sonner", "zod"];
        let dev = ["@types/lodash", "@types/babel__core", "vue-tsc/types"];
        AllowLists {
            runtime: runtime.iter().map(|s| s.to_string()).collect(),
            dev: dev.iter().map(|s| s.to_string()).collect(),
            types_map: build_types_map(dev.into_iter()),
        }
    }

    fn specs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_types_map() {
        let map = build_types_map(["@types/lodash", "@types/babel__core", "eslint"].into_iter());
        assert_eq!(map.get("lodash"), Some(&vec!["@types/lodash".to_string()]));
        assert_eq!(
            map.get("@babel/core"),
            Some(&vec!["@types/babel__core".to_string()])
        );
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_allow_lists_exclusions() {
        let elements: PackageJson = serde_json::from_str(
            r#"{
                "dependencies": { "vue": "^3", "@repo/shadcn-vue": "*", "@repo/utils": "*", "lodash": "^4" },
                "devDependencies": { "typescript": "^5", "@types/lodash": "^4" }
            }"#,
        )
        .unwrap();
        let examples: PackageJson =
            serde_json::from_str(r#"{ "dependencies": { "marked": "^12" } }"#).unwrap();

        let allow = AllowLists::from_packages(&[elements, examples], &Config::default());
        let mut runtime: Vec<_> = allow.runtime.iter().cloned().collect();
        runtime.sort();
        assert_eq!(runtime, vec!["lodash", "marked"]);
        assert!(allow.dev.contains("@types/lodash"));
        assert!(!allow.dev.contains("typescript"));
        assert!(allow.types_map.contains_key("lodash"));
    }

    #[test]
    fn test_packages_use_root_for_runtime() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&["lodash/debounce", "@vueuse/core", "vue-sonner/style.css", "react"]),
            &ClassifyOptions::default(),
        );

        assert_eq!(deps.runtime, set(&["@vueuse/core", "lodash", "vue-sonner"]));
        assert_eq!(deps.dev, set(&["@types/lodash"]));
        assert!(deps.internal.is_empty());
    }

    #[test]
    fn test_dev_matches_exact_specifier() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&["vue-tsc/types", "vue-tsc"]),
            &ClassifyOptions::default(),
        );
        assert_eq!(deps.dev, set(&["vue-tsc/types"]));
        assert!(deps.runtime.is_empty());
    }

    #[test]
    fn test_alias_references() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&[
                "@/components/ui/button",
                "@/components/ui/card/Card.vue",
                "@/components/self/chat/Chat.vue",
                "@/composables/useHelloWorld",
                "@/lib/utils.ts",
                "~/components/self/message",
            ]),
            &ClassifyOptions {
                current_group: Some("prompt"),
                ..Default::default()
            },
        );

        assert_eq!(
            deps.internal,
            set(&[
                "button",
                "card",
                "http://localhost:3001/chat.json",
                "http://localhost:3001/message.json",
                "http://localhost:3001/useHelloWorld.json",
                "http://localhost:3001/utils.json",
            ])
        );
    }

    #[test]
    fn test_self_reference_is_elided() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&[
                "@/components/self/chat/ChatInput.vue",
                "./ChatInput.vue",
                "../chat/types",
            ]),
            &ClassifyOptions {
                file_path: Some("components/self/chat/Chat.vue"),
                current_group: Some("chat"),
                skip_internal_deps: false,
            },
        );
        assert!(deps.is_empty());
    }

    #[test]
    fn test_relative_resolves_against_file_dir() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&["../bar/Bar.vue", "./useB", "../../lib/utils"]),
            &ClassifyOptions {
                file_path: Some("components/self/foo/Foo.vue"),
                current_group: Some("foo"),
                skip_internal_deps: false,
            },
        );
        assert_eq!(deps.internal, set(&["http://localhost:3001/bar.json"]));

        let deps = classifier.classify(
            &specs(&["./useB", "./useA"]),
            &ClassifyOptions {
                file_path: Some("composables/useA.ts"),
                current_group: Some("useA"),
                skip_internal_deps: false,
            },
        );
        assert_eq!(deps.internal, set(&["http://localhost:3001/useB.json"]));
    }

    #[test]
    fn test_relative_without_file_path_is_ignored() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(&specs(&["../bar/Bar.vue"]), &ClassifyOptions::default());
        assert!(deps.is_empty());
    }

    #[test]
    fn test_examples_namespace_wins_over_components() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&["./OtherDemo.vue", "../chat/Chat.vue"]),
            &ClassifyOptions {
                file_path: Some("components/self/examples/ChatDemo.vue"),
                current_group: Some("ChatDemo"),
                skip_internal_deps: false,
            },
        );
        assert_eq!(
            deps.internal,
            set(&[
                "http://localhost:3001/OtherDemo.json",
                "http://localhost:3001/chat.json"
            ])
        );
    }

    #[test]
    fn test_skip_internal_deps_keeps_packages() {
        let allow = allow();
        let classifier = DependencyClassifier::new(&allow, &Config::default());
        let deps = classifier.classify(
            &specs(&["@/components/ui/button", "../bar/Bar.vue", "zod"]),
            &ClassifyOptions {
                file_path: Some("components/self/foo/Foo.vue"),
                current_group: None,
                skip_internal_deps: true,
            },
        );
        assert!(deps.internal.is_empty());
        assert_eq!(deps.runtime, set(&["zod"]));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let allow = allow();
        let config = Config {
            base_url: "https://r.example.dev/".to_string(),
            ..Default::default()
        };
        let classifier = DependencyClassifier::new(&allow, &config);
        let deps = classifier.classify(&specs(&["@/lib/cn"]), &ClassifyOptions::default());
        assert_eq!(deps.internal, set(&["https://r.example.dev/cn.json"]));
    }

    #[test]
    fn test_slug_from_rest() {
        assert_eq!(slug_from_rest("button"), Some("button"));
        assert_eq!(slug_from_rest("button/index.ts"), Some("button"));
        assert_eq!(slug_from_rest("useX.ts"), Some("useX"));
        assert_eq!(slug_from_rest(""), None);
    }
}
