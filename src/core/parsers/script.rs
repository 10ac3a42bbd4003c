use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, FilePathMapping, Globals, SourceMap};
use swc_ecma_ast::{CallExpr, Callee, Expr, ImportDecl, Lit, Module};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

/// Parse TypeScript/JavaScript source into a module AST.
///
/// JSX is enabled only for `.tsx`/`.jsx` paths so generic arrow functions in
/// plain `.ts` and Vue script blocks keep parsing.
pub fn parse_script_source(code: String, file_path: &str) -> Result<Module> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: file_path.ends_with(".tsx") || file_path.ends_with(".jsx"),
            decorators: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e.kind()))
    })
}

/// Collects module specifiers from static imports and dynamic `import("...")`.
#[derive(Debug, Default)]
struct ImportCollector {
    static_imports: Vec<String>,
    dynamic_imports: Vec<String>,
}

impl Visit for ImportCollector {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if let Some(module_path) = node.src.value.as_str() {
            self.static_imports.push(module_path.to_string());
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if matches!(node.callee, Callee::Import(_))
            && let Some(arg) = node.args.first()
            && let Expr::Lit(Lit::Str(s)) = &*arg.expr
            && let Some(module_path) = s.value.as_str()
        {
            self.dynamic_imports.push(module_path.to_string());
        }
        node.visit_children_with(self);
    }
}

/// Parse `code` and return its import specifiers.
///
/// Static imports come first, then dynamic ones; each specifier appears once,
/// at its first occurrence.
pub fn parse_imports(code: &str, file_path: &str) -> Result<Vec<String>> {
    let module = parse_script_source(code.to_string(), file_path)?;

    let mut collector = ImportCollector::default();
    module.visit_with(&mut collector);

    let mut seen = HashSet::new();
    Ok(collector
        .static_imports
        .into_iter()
        .chain(collector.dynamic_imports)
        .filter(|specifier| seen.insert(specifier.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_static_imports_in_order() {
        let code = r#"
import { ref } from 'vue'
import Button from '@/components/ui/button/Button.vue'
import type { Foo } from './types'
import 'vue-sonner/style.css'
"#;
        assert_eq!(
            parse_imports(code, "a.ts").unwrap(),
            vec![
                "vue",
                "@/components/ui/button/Button.vue",
                "./types",
                "vue-sonner/style.css"
            ]
        );
    }

    #[test]
    fn test_dynamic_imports_follow_static() {
        let code = r#"
const Lazy = defineAsyncComponent(() => import('./Lazy.vue'))
import { computed } from 'vue'
async function load() {
  const { marked } = await import("marked")
  const dynamic = await import(someVariable)
  return marked
}
"#;
        assert_eq!(
            parse_imports(code, "a.ts").unwrap(),
            vec!["vue", "./Lazy.vue", "marked"]
        );
    }

    #[test]
    fn test_duplicates_removed() {
        let code = r#"
import { a } from 'lodash'
import { b } from 'lodash'
const c = import('lodash')
const d = import('./x')
const e = import('./x')
"#;
        assert_eq!(parse_imports(code, "a.ts").unwrap(), vec!["lodash", "./x"]);
    }

    #[test]
    fn test_generic_arrow_in_ts() {
        let code = "import { h } from 'vue'\nconst id = <T,>(x: T): T => x\n";
        assert_eq!(parse_imports(code, "a.ts").unwrap(), vec!["vue"]);
    }

    #[test]
    fn test_jsx_in_tsx() {
        let code = "import { h } from 'vue'\nexport const A = () => <div>hi</div>\n";
        assert_eq!(parse_imports(code, "A.tsx").unwrap(), vec!["vue"]);
    }

    #[test]
    fn test_parse_failure_is_error() {
        let code = "import { from 'vue'\nconst = ;";
        let err = parse_imports(code, "broken.ts").unwrap_err();
        assert!(err.to_string().contains("broken.ts"));
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_imports("", "a.ts").unwrap().is_empty());
    }
}
