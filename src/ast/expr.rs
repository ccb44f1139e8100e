use serde::{Deserialize, Serialize};

use crate::ast::{BinaryOp, CompareOp, Dataset, IntervalUnit, LogicalOp, NullsOrder, SortOrder, Value};

/// A general expression node (literal, column, function, operator, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Literal value
    Literal(Value),
    /// A bare column
    Column(String),
    /// table.column
    Qualified { table: String, column: String },
    /// All columns (*)
    Star,
    /// table.*
    QualifiedStar(String),
    /// Raw SQL fragment, emitted verbatim
    Raw(String),
    /// Function call: name(args) or name(DISTINCT args)
    Function {
        name: String,
        args: Vec<Expr>,
        #[serde(default)]
        distinct: bool,
    },
    /// Window function: func OVER (...)
    Window {
        func: Box<Expr>,
        spec: WindowSpec,
    },
    /// Comparison (left op right)
    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },
    /// N-ary AND / OR
    Logical { op: LogicalOp, operands: Vec<Expr> },
    /// NOT expr
    Not(Box<Expr>),
    /// Arithmetic / concatenation (left op right)
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Unary minus
    Negate(Box<Expr>),
    /// LIKE / ILIKE pattern match
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        case_insensitive: bool,
        negated: bool,
        /// Explicit ESCAPE character for this match
        #[serde(default)]
        escape: Option<char>,
    },
    /// Regular expression match
    Regex {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        case_insensitive: bool,
        negated: bool,
    },
    /// IN (list) / IN (subquery)
    In {
        expr: Box<Expr>,
        set: InSet,
        negated: bool,
    },
    /// Range membership, rendered as two comparisons
    Range {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        /// Upper bound excluded (a...b)
        #[serde(default)]
        exclusive: bool,
        #[serde(default)]
        negated: bool,
    },
    /// Scalar subquery
    Subquery(Box<Dataset>),
    /// EXISTS (subquery)
    Exists { query: Box<Dataset>, negated: bool },
    /// CAST(expr AS type)
    Cast { expr: Box<Expr>, target_type: String },
    /// Date arithmetic: base + INTERVAL n UNIT ...
    DateAdd {
        base: Box<Expr>,
        interval: Interval,
        /// Target type of the surrounding CAST (defaults to TIMESTAMP)
        #[serde(default)]
        cast_type: Option<String>,
    },
    /// CASE [operand] WHEN .. THEN .. [ELSE ..] END
    Case {
        operand: Option<Box<Expr>>,
        branches: Vec<(Expr, Expr)>,
        else_value: Option<Box<Expr>>,
    },
    /// expr AS alias
    Aliased { expr: Box<Expr>, alias: String },
}

/// Right-hand side of an IN expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InSet {
    List(Vec<Expr>),
    Subquery(Box<Dataset>),
}

/// OVER (...) specification of a window function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSpec {
    #[serde(default)]
    pub partition: Vec<Expr>,
    #[serde(default)]
    pub order: Vec<OrderTerm>,
    #[serde(default)]
    pub frame: Option<WindowFrame>,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTerm {
    pub expr: Expr,
    /// None renders no direction keyword (engine default ascending)
    #[serde(default)]
    pub direction: Option<SortOrder>,
    #[serde(default)]
    pub nulls: Option<NullsOrder>,
}

impl OrderTerm {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            direction: None,
            nulls: None,
        }
    }

    pub fn asc(expr: impl Into<Expr>) -> Self {
        Self {
            direction: Some(SortOrder::Asc),
            ..Self::new(expr)
        }
    }

    pub fn desc(expr: impl Into<Expr>) -> Self {
        Self {
            direction: Some(SortOrder::Desc),
            ..Self::new(expr)
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }
}

impl From<Expr> for OrderTerm {
    fn from(expr: Expr) -> Self {
        OrderTerm::new(expr)
    }
}

impl From<&str> for OrderTerm {
    fn from(column: &str) -> Self {
        OrderTerm::new(Expr::Column(column.to_string()))
    }
}

/// Window frame definition for window functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowFrame {
    /// ROWS BETWEEN start AND end
    Rows { start: FrameBound, end: FrameBound },
    /// RANGE BETWEEN start AND end
    Range { start: FrameBound, end: FrameBound },
}

/// Window frame boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u32),
    CurrentRow,
    Following(u32),
    UnboundedFollowing,
}

/// Interval specification for date arithmetic.
///
/// Terms keep insertion order; each renders as one `+ INTERVAL n UNIT`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interval {
    pub terms: Vec<(i64, IntervalUnit)>,
}

impl Interval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, amount: i64, unit: IntervalUnit) -> Self {
        self.terms.push((amount, unit));
        self
    }

    pub fn years(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Year)
    }

    pub fn months(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Month)
    }

    pub fn weeks(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Week)
    }

    pub fn days(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Day)
    }

    pub fn hours(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Hour)
    }

    pub fn minutes(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Minute)
    }

    pub fn seconds(self, n: i64) -> Self {
        self.add(n, IntervalUnit::Second)
    }

    /// Same interval with every amount negated (for subtraction).
    pub fn negated(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(n, u)| (-n, *u)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Expr {
    /// The logical complement of this expression.
    ///
    /// Negation is pushed into comparisons and pattern matches where the
    /// dialect has a direct negated form, so that `exclude(x = NULL)`
    /// renders `IS NOT NULL` rather than `NOT (x IS NULL)`.
    pub fn invert(self) -> Expr {
        match self {
            Expr::Compare { left, op, right } => Expr::Compare {
                left,
                op: op.negate(),
                right,
            },
            Expr::Logical { op, operands } => Expr::Logical {
                op: op.flip(),
                operands: operands.into_iter().map(Expr::invert).collect(),
            },
            Expr::Not(inner) => *inner,
            Expr::Like {
                expr,
                pattern,
                case_insensitive,
                negated,
                escape,
            } => Expr::Like {
                expr,
                pattern,
                case_insensitive,
                negated: !negated,
                escape,
            },
            Expr::Regex {
                expr,
                pattern,
                case_insensitive,
                negated,
            } => Expr::Regex {
                expr,
                pattern,
                case_insensitive,
                negated: !negated,
            },
            Expr::In { expr, set, negated } => Expr::In {
                expr,
                set,
                negated: !negated,
            },
            Expr::Range {
                expr,
                low,
                high,
                exclusive,
                negated,
            } => Expr::Range {
                expr,
                low,
                high,
                exclusive,
                negated: !negated,
            },
            Expr::Exists { query, negated } => Expr::Exists {
                query,
                negated: !negated,
            },
            Expr::Literal(Value::Bool(b)) => Expr::Literal(Value::Bool(!b)),
            other => Expr::Not(Box::new(other)),
        }
    }

    /// Whether the expression is a NULL literal.
    pub fn is_null_literal(&self) -> bool {
        matches!(self, Expr::Literal(Value::Null))
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Literal(v)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Literal(Value::Bool(b))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::Literal(Value::Int(n as i64))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Literal(Value::Int(n))
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Literal(Value::Float(n))
    }
}

/// String slices become string literals; use `col()` for column references.
impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Literal(Value::String(s.to_string()))
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Literal(Value::String(s))
    }
}

impl From<Dataset> for Expr {
    fn from(ds: Dataset) -> Self {
        Expr::Subquery(Box::new(ds))
    }
}
