//! 文件查找模块
//!
//! 把编译好的表达式和起始路径组合起来，驱动层序遍历，
//! 并把匹配的路径逐行写入输出。

pub mod dialect;
pub mod entry;
pub mod filter;
pub mod options;
pub mod walker;

use std::io::Write;
use std::path::PathBuf;

use log::{debug, info};

use crate::errors::FindResult;
use crate::expr::{self, Expr};

pub use self::filter::FileFilter;
pub use self::options::FindOptions;
pub use self::walker::FileWalker;

/// 文件查找器
///
/// 由参数列表一次性构建：起始路径、表达式树和遍历选项。
/// 构建成功意味着所有模式都已编译，之后的遍历不会再出现致命错误。
#[derive(Debug, Clone)]
pub struct Finder {
    roots: Vec<PathBuf>,
    expr: Expr,
    options: FindOptions,
}

impl Finder {
    /// 解析参数列表，创建查找器
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> FindResult<Self> {
        let tokens = expr::tokenize(args);
        let parsed = expr::parse(tokens.expression.as_slice())?;
        debug!("起始路径: {:?}，结束时的正则方言: {}", tokens.paths, parsed.dialect);

        Ok(Self {
            roots: tokens.paths.into_iter().map(PathBuf::from).collect(),
            expr: parsed.expr,
            options: parsed.options,
        })
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    /// 惰性的匹配路径序列
    pub fn iter(&self) -> FileWalker<'_> {
        FileWalker::new(self.roots.iter().cloned(), &self.expr, &self.options)
    }

    /// 执行查找，把每个匹配路径写成一行，返回写出的行数
    pub fn run<W: Write>(&self, out: &mut W) -> FindResult<usize> {
        let mut walker = self.iter();
        let mut reported = 0;
        for path in walker.by_ref() {
            writeln!(out, "{}", path.display())?;
            reported += 1;
        }
        out.flush()?;

        info!(
            "报告 {} 个路径，执行 {} 次测试，{} 个诊断",
            reported,
            walker.tests_run(),
            walker.diagnostics()
        );
        Ok(reported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FindError;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_finder_from_args() -> FindResult<()> {
        let finder = Finder::from_args(&["src", "tests", "-name", "*.rs"])?;
        assert_eq!(finder.roots(), &[PathBuf::from("src"), PathBuf::from("tests")]);
        assert_eq!(finder.expr().to_string(), "-name '*.rs'");
        assert_eq!(finder.options(), &FindOptions::default());

        let finder = Finder::from_args::<&str>(&[])?;
        assert_eq!(finder.roots(), &[PathBuf::from(".")]);
        Ok(())
    }

    #[test]
    fn test_finder_fails_before_output() {
        let mut out = Vec::new();
        let result = Finder::from_args(&[".", "-name", "ok", "-type", "z"])
            .and_then(|f| f.run(&mut out));
        assert!(matches!(result, Err(FindError::InvalidTypeCode(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_finder_run() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("dir1"))?;
        File::create(base_path.join("dir1").join("test1.txt"))?;
        File::create(base_path.join("test2.txt"))?;

        let root = base_path.to_string_lossy().into_owned();
        let finder = Finder::from_args(&[root.as_str(), "-name", "*.txt"])?;
        let mut out = Vec::new();
        let reported = finder.run(&mut out)?;

        assert_eq!(reported, 2);
        let expected = format!(
            "{}\n{}\n",
            base_path.join("test2.txt").display(),
            base_path.join("dir1").join("test1.txt").display()
        );
        assert_eq!(String::from_utf8(out)?, expected);
        Ok(())
    }
}
