//! Compiled regex tables for the pattern-driven extractors.
//!
//! Each pattern compiles lazily on first use. A pattern that fails to compile
//! resolves to `None` and simply matches nothing.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

/// A capture-group rewrite applied to a generic import target.
pub type Rewrite = fn(&str) -> String;

/// A generic import shape: pattern plus optional target rewrite.
pub struct ImportPattern {
    pub regex: &'static LazyLock<Option<Regex>>,
    pub rewrite: Option<Rewrite>,
}

// ── Generic imports ───────────────────────────────────────────────────────
pattern!(RE_INCLUDE, r#"#include\s*[<"]([^>"]+)[>"]"#);
pattern!(RE_USING, r"using\s+([\w.]+)\s*;");
pattern!(RE_USE, r"use\s+([\w:\\]+)\s*;");
pattern!(RE_BARE_IMPORT, r#"import\s+(?:\(\s*)?["\s]*([\w/.-]+)[")\s]"#);

fn path_separators(target: &str) -> String {
    target.replace("::", "/")
}

/// Cross-language import shapes scanned in files without a dedicated extractor.
pub static GENERIC_IMPORTS: &[ImportPattern] = &[
    ImportPattern { regex: &RE_INCLUDE, rewrite: None },
    ImportPattern { regex: &RE_USING, rewrite: None },
    ImportPattern { regex: &RE_USE, rewrite: Some(path_separators) },
    ImportPattern { regex: &RE_BARE_IMPORT, rewrite: None },
];

// ── Script imports ────────────────────────────────────────────────────────
pattern!(
    RE_IMPORT_FROM,
    r#"import\s+(?:(?:\{[^}]*\}|\*\s+as\s+\w+|\w+)(?:\s*,\s*(?:\{[^}]*\}|\*\s+as\s+\w+|\w+))*)\s+from\s+['"]([^'"]+)['"]"#
);
pattern!(RE_REQUIRE, r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#);
pattern!(RE_DYNAMIC_IMPORT, r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#);

/// Module-specifier shapes: static import-from, require, dynamic import.
pub static SCRIPT_IMPORTS: &[&LazyLock<Option<Regex>>] =
    &[&RE_IMPORT_FROM, &RE_REQUIRE, &RE_DYNAMIC_IMPORT];

// ── Script declarations ───────────────────────────────────────────────────
pattern!(
    RE_ROUTE,
    r#"(?:app|router|server)\s*\.\s*(get|post|put|patch|delete|all|use|head|options)\s*\(\s*['"]([^'"]*)['"]\s*"#
);
pattern!(
    RE_CLASS_DECL,
    r"(?:export\s+(?:default\s+)?)?class\s+(\w+)(?:\s+extends\s+(\w+))?"
);
pattern!(
    RE_FUNCTION_DECL,
    r"(?:export\s+(?:default\s+)?)?(?:async\s+)?function\s+(\w+)"
);
pattern!(
    RE_ARROW_DECL,
    r"(?:export\s+(?:default\s+)?)?(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:\([^)]*\)|[\w]+)\s*=>"
);

/// Function declaration shapes, scanned in this order.
pub static FUNCTION_DECLS: &[&LazyLock<Option<Regex>>] = &[&RE_FUNCTION_DECL, &RE_ARROW_DECL];

pattern!(RE_MONGOOSE_MODEL, r#"mongoose\.model\s*\(\s*['"](\w+)['"]"#);
pattern!(RE_SEQUELIZE_DEFINE, r#"sequelize\.define\s*\(\s*['"](\w+)['"]"#);

/// Schema-builder calls declaring a named model.
pub static MODEL_DECLS: &[&LazyLock<Option<Regex>>] = &[&RE_MONGOOSE_MODEL, &RE_SEQUELIZE_DEFINE];

// ── Script presence markers ───────────────────────────────────────────────
pattern!(RE_FETCH_CALL, r"(?:fetch|axios)\s*[.(]");
pattern!(RE_AXIOS_METHOD, r"axios\s*\.\s*(get|post|put|patch|delete|head|options)\s*\(");
pattern!(
    RE_DB_READ,
    r"\.\s*(find|findOne|findMany|findById|findAll|select|where|aggregate|count|countDocuments)\s*\("
);
pattern!(
    RE_DB_WRITE,
    r"\.\s*(save|create|insert|insertOne|insertMany|update|updateOne|updateMany|delete|deleteOne|deleteMany|remove|destroy|bulkCreate|upsert)\s*\("
);
pattern!(RE_ROUTER_INIT, r"(?:express\.Router|Router)\s*\(\s*\)");

pub static API_CALLS: &[&LazyLock<Option<Regex>>] = &[&RE_FETCH_CALL, &RE_AXIOS_METHOD];
pub static DB_READS: &[&LazyLock<Option<Regex>>] = &[&RE_DB_READ];
pub static DB_WRITES: &[&LazyLock<Option<Regex>>] = &[&RE_DB_WRITE];

/// The compiled regex, if the pattern compiled.
pub fn compiled(regex: &LazyLock<Option<Regex>>) -> Option<&Regex> {
    regex.as_ref()
}

/// Whether any pattern in `table` matches somewhere in `content`.
pub fn any_match(table: &[&LazyLock<Option<Regex>>], content: &str) -> bool {
    table
        .iter()
        .any(|re| compiled(re).is_some_and(|re| re.is_match(content)))
}

/// First capture group of every match, paired with the match start offset.
pub fn first_captures<'c>(
    regex: &LazyLock<Option<Regex>>,
    content: &'c str,
) -> Vec<(usize, &'c str)> {
    let Some(re) = compiled(regex) else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let first = caps.get(1)?;
            Some((whole.start(), first.as_str()))
        })
        .collect()
}
