//! 表达式解析
//!
//! 递归下降解析，优先级从高到低：`!`/`-not`、`-a`/`-and`（或相邻省略）、
//! `-o`/`-or`。`-regextype`、`-maxdepth`、`-mindepth` 是位置相关的选项，
//! 不产生节点。所有模式在这里即时编译，出错时在遍历开始前失败。

use log::debug;

use super::{Expr, Predicate};
use crate::errors::{FindError, FindResult};
use crate::finder::dialect::RegexDialect;
use crate::finder::filter::{GlobFilter, GlobTarget, RegexFilter, TypeFilter};
use crate::finder::options::FindOptions;

/// 解析结果：表达式树以及解析过程中确定的选项
#[derive(Debug, Clone)]
pub struct ParsedExpression {
    pub expr: Expr,
    pub options: FindOptions,
    /// 解析结束时生效的正则方言
    pub dialect: RegexDialect,
}

/// 解析表达式记号；空记号流得到 `-true`
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> FindResult<ParsedExpression> {
    let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        dialect: RegexDialect::default(),
        options: FindOptions::default(),
    };

    let expr = parser.parse_or()?;
    if let Some(extra) = parser.peek() {
        return Err(FindError::InvalidExpression(format!("多余的 '{}'", extra)));
    }

    let expr = expr.unwrap_or(Expr::Literal(true));
    debug!("编译后的表达式: {}", expr);

    Ok(ParsedExpression {
        expr,
        options: parser.options,
        dialect: parser.dialect,
    })
}

struct Parser<'a> {
    tokens: &'a [&'a str],
    pos: usize,
    dialect: RegexDialect,
    options: FindOptions,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn argument(&mut self, flag: &str) -> FindResult<&'a str> {
        self.advance()
            .ok_or_else(|| FindError::MissingArgument(flag.to_string()))
    }

    /// or := and ( ("-o" | "-or") and )*
    fn parse_or(&mut self) -> FindResult<Option<Expr>> {
        let mut left = self.parse_and()?;

        while let Some(op @ ("-o" | "-or")) = self.peek() {
            self.pos += 1;
            let lhs = left.ok_or_else(|| nothing_before(op))?;
            let rhs = self.parse_and()?.ok_or_else(|| nothing_after(op))?;
            left = Some(Expr::or(lhs, rhs));
        }

        Ok(left)
    }

    /// and := unary ( ["-a" | "-and"] unary )*
    fn parse_and(&mut self) -> FindResult<Option<Expr>> {
        let mut left = self.parse_unary()?;

        loop {
            match self.peek() {
                None | Some("-o") | Some("-or") | Some(")") => break,
                Some(op @ ("-a" | "-and")) => {
                    self.pos += 1;
                    let lhs = left.ok_or_else(|| nothing_before(op))?;
                    let rhs = self.parse_unary()?.ok_or_else(|| nothing_after(op))?;
                    left = Some(Expr::and(lhs, rhs));
                }
                Some(_) => {
                    if let Some(rhs) = self.parse_unary()? {
                        left = Some(match left {
                            Some(lhs) => Expr::and(lhs, rhs),
                            None => rhs,
                        });
                    }
                }
            }
        }

        Ok(left)
    }

    /// unary := ("!" | "-not") unary | primary
    ///
    /// 只剩选项时返回 `None`。
    fn parse_unary(&mut self) -> FindResult<Option<Expr>> {
        self.parse_options()?;

        match self.peek() {
            None | Some("-o") | Some("-or") | Some("-a") | Some("-and") | Some(")") => Ok(None),
            Some(op @ ("!" | "-not")) => {
                self.pos += 1;
                let child = self.parse_unary()?.ok_or_else(|| nothing_after(op))?;
                Ok(Some(Expr::not(child)))
            }
            Some(_) => self.parse_primary().map(Some),
        }
    }

    fn parse_primary(&mut self) -> FindResult<Expr> {
        let token = self
            .advance()
            .ok_or_else(|| FindError::InvalidExpression("表达式意外结束".to_string()))?;

        let expr = match token {
            "(" => {
                let inner = self.parse_or()?.ok_or_else(|| {
                    FindError::InvalidExpression("括号中缺少表达式".to_string())
                })?;
                if self.advance() != Some(")") {
                    return Err(FindError::InvalidExpression("缺少 ')'".to_string()));
                }
                inner
            }
            "-true" => Expr::Literal(true),
            "-false" => Expr::Literal(false),
            "-print" => Expr::Print,
            "-name" | "-iname" => {
                let pattern = self.argument(token)?;
                let filter = glob(pattern, GlobTarget::Name, token == "-iname")?;
                Expr::Predicate(Predicate::Name(filter))
            }
            "-path" | "-wholename" | "-ipath" | "-iwholename" => {
                let pattern = self.argument(token)?;
                let ignore_case = token.starts_with("-i");
                Expr::Predicate(Predicate::Path(glob(pattern, GlobTarget::Path, ignore_case)?))
            }
            "-regex" | "-iregex" => {
                let pattern = self.argument(token)?;
                let filter = RegexFilter::new(pattern, self.dialect, token == "-iregex")?;
                Expr::Predicate(Predicate::Regex(filter))
            }
            "-type" => {
                let codes = self.argument(token)?;
                Expr::Predicate(Predicate::Type(TypeFilter::new(codes)?))
            }
            other => return Err(FindError::UnknownPredicate(other.to_string())),
        };

        Ok(expr)
    }

    /// 消费连续的选项记号
    fn parse_options(&mut self) -> FindResult<()> {
        loop {
            match self.peek() {
                Some("-regextype") => {
                    self.pos += 1;
                    let name = self.argument("-regextype")?;
                    self.dialect = RegexDialect::from_name(name)?;
                    debug!("正则方言切换为 {}", self.dialect);
                }
                Some(flag @ ("-maxdepth" | "-mindepth")) => {
                    self.pos += 1;
                    let value = self.argument(flag)?;
                    let depth = value.parse::<usize>().map_err(|_| FindError::InvalidNumber {
                        option: flag.to_string(),
                        value: value.to_string(),
                    })?;
                    let options = std::mem::take(&mut self.options);
                    self.options = if flag == "-maxdepth" {
                        options.with_max_depth(Some(depth))
                    } else {
                        options.with_min_depth(depth)
                    };
                }
                _ => return Ok(()),
            }
        }
    }
}

fn glob(pattern: &str, target: GlobTarget, ignore_case: bool) -> FindResult<GlobFilter> {
    if ignore_case {
        GlobFilter::new_ignore_case(pattern, target)
    } else {
        GlobFilter::new(pattern, target)
    }
}

fn nothing_before(op: &str) -> FindError {
    FindError::InvalidExpression(format!("'{}' 前面缺少表达式", op))
}

fn nothing_after(op: &str) -> FindError {
    FindError::InvalidExpression(format!("'{}' 后面缺少表达式", op))
}
