//! Statement classification.
//!
//! A line is classified exactly once: the ordered prefix table picks a
//! [`StatementKind`], then the shape for that kind splits out the names and the
//! trailing expression text. Expressions stay unresolved until execution.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ErrorKind;

/// Statement kinds, in the order their prefixes are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Declare,
    Shout,
    Add,
    Sub,
    Mult,
    Div,
    Grind,
    Compare,
    Keep,
}

/// Ordered prefix table. The first matching prefix decides the kind.
const PREFIXES: &[(&str, StatementKind)] = &[
    ("vibe ", StatementKind::Declare),
    ("shout ", StatementKind::Shout),
    ("add ", StatementKind::Add),
    ("sub ", StatementKind::Sub),
    ("mult ", StatementKind::Mult),
    ("div ", StatementKind::Div),
    ("grind ", StatementKind::Grind),
    ("fr ", StatementKind::Compare),
    ("keep vibing ", StatementKind::Keep),
];

static DECLARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^vibe\s+([A-Za-z0-9_]+)\s*=\s*(.+)$").unwrap());
static SHOUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^shout\s+(.+)$").unwrap());
static ARITHMETIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:add|sub|mult|div)\s+([A-Za-z0-9_]+)\s+([A-Za-z0-9_]+)\s+(.+)$").unwrap()
});
static GRIND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^grind\s+(.+)$").unwrap());
static COMPARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^fr\s+([A-Za-z0-9_]+)\s+same\s+(.+)$").unwrap());
static KEEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^keep vibing\s+([A-Za-z0-9_]+)\s+high\s+(.+)$").unwrap());

impl StatementKind {
    /// Pick the kind for a trimmed line by prefix.
    pub fn classify(line: &str) -> Option<StatementKind> {
        PREFIXES
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    fn shape_error(&self) -> &'static str {
        match self {
            StatementKind::Declare => "Invalid variable declaration syntax",
            StatementKind::Shout => "Invalid print statement syntax",
            StatementKind::Add => "Invalid addition syntax",
            StatementKind::Sub => "Invalid subtraction syntax",
            StatementKind::Mult => "Invalid multiplication syntax",
            StatementKind::Div => "Invalid division syntax",
            StatementKind::Grind => "Invalid loop syntax",
            StatementKind::Compare => "Invalid conditional syntax",
            StatementKind::Keep => "Invalid keep statement syntax",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            StatementKind::Declare => &*DECLARE,
            StatementKind::Shout => &*SHOUT,
            StatementKind::Add | StatementKind::Sub | StatementKind::Mult | StatementKind::Div => {
                &*ARITHMETIC
            }
            StatementKind::Grind => &*GRIND,
            StatementKind::Compare => &*COMPARE,
            StatementKind::Keep => &*KEEP,
        }
    }
}

/// Arithmetic operator of an `add`/`sub`/`mult`/`div` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mult,
    Div,
}

/// One classified statement borrowing from its source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `vibe NAME = EXPR`
    Declare { name: &'a str, expr: &'a str },
    /// `shout EXPR`
    Shout { expr: &'a str },
    /// `OP TARGET SOURCE EXPR`
    Arithmetic {
        op: ArithOp,
        target: &'a str,
        source: &'a str,
        expr: &'a str,
    },
    /// `grind EXPR`
    Grind { count: &'a str },
    /// `fr NAME same EXPR`
    Compare { name: &'a str, expr: &'a str },
    /// `keep vibing NAME high EXPR`
    Keep { name: &'a str, expr: &'a str },
}

impl<'a> Statement<'a> {
    /// Classify a trimmed, non-blank, non-comment line.
    pub fn parse(line: &'a str) -> Result<Statement<'a>, ErrorKind> {
        let kind = StatementKind::classify(line).ok_or_else(|| ErrorKind::Syntax {
            message: "Unknown statement",
            text: line.to_string(),
        })?;

        let caps = kind.regex().captures(line).ok_or_else(|| ErrorKind::Syntax {
            message: kind.shape_error(),
            text: line.to_string(),
        })?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let expr = |i: usize| group(i).trim();

        let statement = match kind {
            StatementKind::Declare => Statement::Declare {
                name: group(1),
                expr: expr(2),
            },
            StatementKind::Shout => Statement::Shout { expr: expr(1) },
            StatementKind::Add | StatementKind::Sub | StatementKind::Mult | StatementKind::Div => {
                let op = match kind {
                    StatementKind::Add => ArithOp::Add,
                    StatementKind::Sub => ArithOp::Sub,
                    StatementKind::Mult => ArithOp::Mult,
                    _ => ArithOp::Div,
                };
                Statement::Arithmetic {
                    op,
                    target: group(1),
                    source: group(2),
                    expr: expr(3),
                }
            }
            StatementKind::Grind => Statement::Grind { count: expr(1) },
            StatementKind::Compare => Statement::Compare {
                name: group(1),
                expr: expr(2),
            },
            StatementKind::Keep => Statement::Keep {
                name: group(1),
                expr: expr(2),
            },
        };
        Ok(statement)
    }

    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Declare { .. } => StatementKind::Declare,
            Statement::Shout { .. } => StatementKind::Shout,
            Statement::Arithmetic { op, .. } => match op {
                ArithOp::Add => StatementKind::Add,
                ArithOp::Sub => StatementKind::Sub,
                ArithOp::Mult => StatementKind::Mult,
                ArithOp::Div => StatementKind::Div,
            },
            Statement::Grind { .. } => StatementKind::Grind,
            Statement::Compare { .. } => StatementKind::Compare,
            Statement::Keep { .. } => StatementKind::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare() {
        assert_eq!(
            Statement::parse("vibe name = \"KANG\""),
            Ok(Statement::Declare { name: "name", expr: "\"KANG\"" })
        );
        assert_eq!(
            Statement::parse("vibe x=5"),
            Ok(Statement::Declare { name: "x", expr: "5" })
        );
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            Statement::parse("div q  num   2"),
            Ok(Statement::Arithmetic {
                op: ArithOp::Div,
                target: "q",
                source: "num",
                expr: "2",
            })
        );
        let mult = Statement::parse("mult product a b").unwrap();
        assert_eq!(mult.kind(), StatementKind::Mult);
    }

    #[test]
    fn test_shout_keeps_expression_text() {
        assert_eq!(
            Statement::parse("shout \"Hello, World!\""),
            Ok(Statement::Shout { expr: "\"Hello, World!\"" })
        );
    }

    #[test]
    fn test_grind_compare_keep() {
        assert_eq!(Statement::parse("grind 5"), Ok(Statement::Grind { count: "5" }));
        assert_eq!(
            Statement::parse("fr score same 85"),
            Ok(Statement::Compare { name: "score", expr: "85" })
        );
        assert_eq!(
            Statement::parse("keep vibing mood high \"happy\""),
            Ok(Statement::Keep { name: "mood", expr: "\"happy\"" })
        );
    }

    #[test]
    fn test_unknown_statement() {
        assert_eq!(
            Statement::parse("foo bar"),
            Err(ErrorKind::Syntax {
                message: "Unknown statement",
                text: "foo bar".into(),
            })
        );
        // Prefixes need the trailing space
        assert!(Statement::parse("vibe").is_err());
        assert!(Statement::parse("shoutx \"a\"").is_err());
        assert!(Statement::parse("keep x high 1").is_err());
    }

    #[test]
    fn test_malformed_shape() {
        let err = Statement::parse("vibe = 5").unwrap_err();
        assert_eq!(
            err,
            ErrorKind::Syntax {
                message: "Invalid variable declaration syntax",
                text: "vibe = 5".into(),
            }
        );
        assert!(matches!(
            Statement::parse("add r a"),
            Err(ErrorKind::Syntax { message: "Invalid addition syntax", .. })
        ));
        assert!(matches!(
            Statement::parse("fr x is 5"),
            Err(ErrorKind::Syntax { message: "Invalid conditional syntax", .. })
        ));
    }

    #[test]
    fn test_prefix_order() {
        assert_eq!(StatementKind::classify("fr x same 1"), Some(StatementKind::Compare));
        assert_eq!(StatementKind::classify("keep vibing x high 1"), Some(StatementKind::Keep));
        assert_eq!(StatementKind::classify("frog"), None);
    }
}
