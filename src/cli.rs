//! refind 的命令行接口
//!
//! 本模块只负责捕获参数：起始路径和表达式原样交给 [`crate::Finder`]，
//! 这里只处理日志和错误输出相关的开关。

use clap::Parser;

/// 类 find 的文件查找工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 启用调试日志
    #[arg(long)]
    pub debug: bool,

    /// 出错时输出完整的诊断信息（也可以在表达式中写 -verbose）
    #[arg(long)]
    pub verbose: bool,

    /// 起始路径（默认：当前目录）和表达式
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// 是否启用详细错误输出
    pub fn is_verbose(&self) -> bool {
        self.verbose || self.split_verbose().1
    }

    /// 去掉 verbose 开关之后交给查找器的参数
    pub fn find_args(&self) -> Vec<&str> {
        self.split_verbose().0
    }

    /// 分离 verbose 开关；谓词的参数即使写作 `-verbose` 也原样保留
    fn split_verbose(&self) -> (Vec<&str>, bool) {
        let mut args = Vec::with_capacity(self.args.len());
        let mut verbose = false;
        let mut expects_argument = false;

        for arg in self.args.iter().map(String::as_str) {
            if !expects_argument && is_verbose_flag(arg) {
                verbose = true;
            } else {
                args.push(arg);
            }
            expects_argument = !expects_argument && takes_argument(arg);
        }

        (args, verbose)
    }

    /// 日志级别
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}

fn is_verbose_flag(arg: &str) -> bool {
    arg == "-verbose" || arg == "--verbose"
}

/// 后面紧跟一个参数的谓词和选项
fn takes_argument(arg: &str) -> bool {
    matches!(
        arg,
        "-name"
            | "-iname"
            | "-path"
            | "-ipath"
            | "-wholename"
            | "-iwholename"
            | "-regex"
            | "-iregex"
            | "-type"
            | "-regextype"
            | "-maxdepth"
            | "-mindepth"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_style_arguments_pass_through() {
        let cli =
            Cli::try_parse_from(["refind", ".", "-name", "*.rs", "-o", "!", "-type", "d"])
                .unwrap();
        assert_eq!(cli.find_args(), vec![".", "-name", "*.rs", "-o", "!", "-type", "d"]);
        assert!(!cli.is_verbose());
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_expression_without_path() {
        let cli = Cli::try_parse_from(["refind", "-name", "file?.txt"]).unwrap();
        assert_eq!(cli.find_args(), vec!["-name", "file?.txt"]);
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::try_parse_from(["refind", ".", "-verbose", "-true"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.find_args(), vec![".", "-true"]);

        let cli = Cli::try_parse_from(["refind", "--verbose", "--debug", "."]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        assert_eq!(cli.find_args(), vec!["."]);
    }

    #[test]
    fn test_verbose_as_predicate_argument() {
        let cli = Cli::try_parse_from(["refind", ".", "-name", "-verbose"]).unwrap();
        assert!(!cli.is_verbose());
        assert_eq!(cli.find_args(), vec![".", "-name", "-verbose"]);

        let cli =
            Cli::try_parse_from(["refind", ".", "-path", "-verbose", "-verbose"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.find_args(), vec![".", "-path", "-verbose"]);

        // `-name -name` consumes the second one as a pattern
        let cli = Cli::try_parse_from(["refind", "-name", "-name", "-verbose"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.find_args(), vec!["-name", "-name"]);
    }
}
