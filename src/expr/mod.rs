//! 表达式树与求值
//!
//! 表达式在启动时由 [`parser`] 一次性构建，之后只读；
//! 遍历过程中对每个条目调用 [`Expr::evaluate`]。

pub mod parser;
pub mod tokenizer;

use std::fmt;

use crate::finder::entry::VisitedEntry;
use crate::finder::filter::{FileFilter, GlobFilter, RegexFilter, TypeFilter};

pub use parser::{parse, ParsedExpression};
pub use tokenizer::{tokenize, Tokens};

/// 谓词叶子，持有预编译的匹配器
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `-name` / `-iname`
    Name(GlobFilter),
    /// `-path` / `-wholename` 及其忽略大小写版本
    Path(GlobFilter),
    /// `-regex` / `-iregex`
    Regex(RegexFilter),
    /// `-type`
    Type(TypeFilter),
}

impl Predicate {
    fn filter(&self) -> &dyn FileFilter {
        match self {
            Predicate::Name(f) | Predicate::Path(f) => f as &dyn FileFilter,
            Predicate::Regex(f) => f,
            Predicate::Type(f) => f,
        }
    }

    pub fn matches(&self, entry: &VisitedEntry) -> bool {
        self.filter().matches(entry)
    }
}

/// 表达式树节点
#[derive(Debug, Clone)]
pub enum Expr {
    /// `-true` / `-false`
    Literal(bool),
    /// 叶子测试
    Predicate(Predicate),
    /// `-print`：恒为真，并请求输出当前条目
    Print,
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// 单个条目求值期间的可变状态
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// 本条目被 `-print` 请求输出的次数
    pub prints: usize,
    /// 已执行的谓词测试次数
    pub tests_run: usize,
}

impl Expr {
    pub fn not(child: Expr) -> Self {
        Expr::Not(Box::new(child))
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// 对单个条目求值，按从左到右的顺序短路
    pub fn evaluate(&self, entry: &VisitedEntry, ctx: &mut EvalContext) -> bool {
        match self {
            Expr::Literal(value) => *value,
            Expr::Predicate(predicate) => {
                ctx.tests_run += 1;
                predicate.matches(entry)
            }
            Expr::Print => {
                ctx.prints += 1;
                true
            }
            Expr::Not(child) => !child.evaluate(entry, ctx),
            Expr::And(left, right) => left.evaluate(entry, ctx) && right.evaluate(entry, ctx),
            Expr::Or(left, right) => left.evaluate(entry, ctx) || right.evaluate(entry, ctx),
        }
    }

    /// 树中是否含有输出动作；没有时由调用方隐式输出匹配的条目
    pub fn has_action(&self) -> bool {
        match self {
            Expr::Print => true,
            Expr::Literal(_) | Expr::Predicate(_) => false,
            Expr::Not(child) => child.has_action(),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.has_action() || right.has_action()
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(true) => f.write_str("-true"),
            Expr::Literal(false) => f.write_str("-false"),
            Expr::Predicate(predicate) => f.write_str(&predicate.filter().description()),
            Expr::Print => f.write_str("-print"),
            Expr::Not(child) => write!(f, "! {}", child),
            Expr::And(left, right) => write!(f, "( {} -a {} )", left, right),
            Expr::Or(left, right) => write!(f, "( {} -o {} )", left, right),
        }
    }
}
