//! Sample programs and the language guide shipped with the language.

/// A bundled sample program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub code: &'static str,
}

impl Example {
    /// Lowercase, dash-separated title, e.g. `complex-example`.
    pub fn slug(&self) -> String {
        self.title.to_lowercase().replace(' ', "-")
    }
}

pub const EXAMPLES: &[Example] = &[
    Example {
        title: "Hello World",
        description: "Basic output statement",
        category: "basics",
        code: r#"shout "Hello, World!""#,
    },
    Example {
        title: "Variables",
        description: "Declaring and using variables",
        category: "variables",
        code: r#"vibe name = "KANG"
vibe version = 1.0
shout name
shout version"#,
    },
    Example {
        title: "Arithmetic Operations",
        description: "Basic math operations",
        category: "arithmetic",
        code: "vibe x = 10
vibe y = 5
add result x y
shout result
sub difference x y
shout difference",
    },
    Example {
        title: "Loops",
        description: "Repeating operations",
        category: "loops",
        code: r#"vibe count = 0
grind 5
    shout "Looping..."
    add count count 1"#,
    },
    Example {
        title: "Conditionals",
        description: "Making decisions",
        category: "conditionals",
        code: r#"vibe score = 85
fr score same 85
    shout "Perfect score!""#,
    },
    Example {
        title: "Complex Example",
        description: "Combining multiple features",
        category: "advanced",
        code: r#"vibe count = 0
grind 5
    shout "Looping..."
    add count count 1

fr count same 5
    shout "Count reached 5!"

keep vibing count high 0"#,
    },
];

/// Category names in the order they first appear in [`EXAMPLES`].
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for example in EXAMPLES {
        if !seen.contains(&example.category) {
            seen.push(example.category);
        }
    }
    seen
}

/// Examples belonging to `category`.
pub fn in_category(category: &str) -> impl Iterator<Item = &'static Example> + '_ {
    EXAMPLES.iter().filter(move |e| e.category == category)
}

/// One entry of the language guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageFeature {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub syntax: &'static str,
    /// Single-line snippets. Each classifies as a statement, but a snippet may
    /// still fail at run time on its own: `shout 42` looks up a variable named
    /// `42`, and names like `x` are unbound without a prior `vibe`.
    pub examples: &'static [&'static str],
}

pub const FEATURES: &[LanguageFeature] = &[
    LanguageFeature {
        id: "variables",
        title: "Variables",
        description: "Store and manipulate data using the 'vibe' keyword",
        syntax: "vibe variable_name = value",
        examples: &[r#"vibe name = "John""#, "vibe age = 25", "vibe isActive = true"],
    },
    LanguageFeature {
        id: "print",
        title: "Print Statement",
        description: "Output text or variable values using 'shout'",
        syntax: "shout value_or_variable",
        examples: &[r#"shout "Hello World""#, "shout variable_name", "shout 42"],
    },
    LanguageFeature {
        id: "arithmetic",
        title: "Arithmetic Operations",
        description: "Perform mathematical operations",
        syntax: "operation target source value",
        examples: &[
            "add result x 5",
            "sub difference y 3",
            "mult product a b",
            "div quotient num 2",
        ],
    },
    LanguageFeature {
        id: "loops",
        title: "Loops",
        description: "Repeat operations using 'grind'",
        syntax: "grind count",
        examples: &["grind 5", "grind variable_name"],
    },
    LanguageFeature {
        id: "conditionals",
        title: "Conditional Statements",
        description: "Make decisions using 'fr' and 'same'",
        syntax: "fr variable same value",
        examples: &["fr x same 10", r#"fr name same "John""#, "fr isReady same true"],
    },
    LanguageFeature {
        id: "custom",
        title: "Custom Keywords",
        description: "Special KANG expressions",
        syntax: "keep vibing variable high value",
        examples: &["keep vibing energy high 100", r#"keep vibing mood high "happy""#],
    },
];

/// Find a guide entry by id, ignoring case.
pub fn feature(id: &str) -> Option<&'static LanguageFeature> {
    let wanted = id.trim().to_lowercase();
    FEATURES.iter().find(|f| f.id == wanted)
}

/// Find an example by title or slug, ignoring case.
pub fn find(name: &str) -> Option<&'static Example> {
    let wanted = name.trim().to_lowercase();
    EXAMPLES
        .iter()
        .find(|e| e.title.to_lowercase() == wanted || e.slug() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::statement::{Statement, StatementKind};

    #[test]
    fn test_find_by_title_and_slug() {
        assert_eq!(find("hello world").unwrap().category, "basics");
        assert_eq!(find("Complex-Example").unwrap().category, "advanced");
        assert!(find("missing").is_none());
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = EXAMPLES.iter().map(|e| e.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), EXAMPLES.len());
    }

    #[test]
    fn test_categories_keep_first_appearance_order() {
        assert_eq!(
            categories(),
            vec!["basics", "variables", "arithmetic", "loops", "conditionals", "advanced"]
        );
        assert_eq!(in_category("loops").count(), 1);
        assert_eq!(in_category("nope").count(), 0);
    }

    #[test]
    fn test_feature_lookup() {
        assert_eq!(feature("Loops").unwrap().syntax, "grind count");
        assert!(feature("missing").is_none());

        let ids: std::collections::HashSet<_> = FEATURES.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), FEATURES.len());
    }

    #[test]
    fn test_feature_snippets_classify() {
        for feature in FEATURES {
            // `operation target source value` stands for all four arithmetic kinds
            let expected = StatementKind::classify(feature.syntax);
            for snippet in feature.examples {
                let statement = Statement::parse(snippet)
                    .unwrap_or_else(|e| panic!("{} ({}): {}", snippet, feature.id, e));
                if let Some(kind) = expected {
                    assert_eq!(statement.kind(), kind, "{}", snippet);
                }
            }
        }
    }

    #[test]
    fn test_shout_number_snippet_fails_at_run_time() {
        let ctx = crate::execute("shout 42");
        assert_eq!(
            ctx.error().map(|e| &e.kind),
            Some(&ErrorKind::UnboundVariable { name: "42".into() })
        );
    }
}
