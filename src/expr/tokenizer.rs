//! 参数切分
//!
//! 把原始参数列表拆成起始路径和表达式记号两部分。

/// 切分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    /// 起始路径，至少一个（默认：当前目录）
    pub paths: Vec<String>,
    /// 表达式记号，保持原有顺序
    pub expression: Vec<String>,
}

/// 是否为表达式的第一个记号：谓词、运算符或左括号
fn starts_expression(arg: &str) -> bool {
    matches!(arg, "!" | "(") || (arg.starts_with('-') && arg.len() > 1)
}

/// 切分参数列表
///
/// 第一个表达式记号之前的参数都是起始路径；没有路径时使用 `.`。
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Tokens {
    let split = args
        .iter()
        .position(|arg| starts_expression(arg.as_ref()))
        .unwrap_or(args.len());

    let mut paths: Vec<String> = args[..split].iter().map(|a| a.as_ref().to_string()).collect();
    if paths.is_empty() {
        paths.push(".".to_string());
    }

    Tokens {
        paths,
        expression: args[split..].iter().map(|a| a.as_ref().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_then_expression() {
        let tokens = tokenize(&["a", "b", "-name", "x", "c"]);
        assert_eq!(tokens.paths, vec!["a", "b"]);
        assert_eq!(tokens.expression, vec!["-name", "x", "c"]);
    }

    #[test]
    fn test_default_path() {
        let tokens = tokenize(&["-type", "f"]);
        assert_eq!(tokens.paths, vec!["."]);
        assert_eq!(tokens.expression, vec!["-type", "f"]);

        let tokens = tokenize::<&str>(&[]);
        assert_eq!(tokens.paths, vec!["."]);
        assert!(tokens.expression.is_empty());
    }

    #[test]
    fn test_negation_and_parens_start_expression() {
        let tokens = tokenize(&[".", "!", "-name", "x"]);
        assert_eq!(tokens.paths, vec!["."]);
        assert_eq!(tokens.expression[0], "!");

        let tokens = tokenize(&["src", "(", "-true", ")"]);
        assert_eq!(tokens.paths, vec!["src"]);
        assert_eq!(tokens.expression.len(), 3);
    }

    #[test]
    fn test_lone_dash_is_a_path() {
        let tokens = tokenize(&["-"]);
        assert_eq!(tokens.paths, vec!["-"]);
        assert!(tokens.expression.is_empty());
    }
}
