//! 类 find(1) 的谓词引擎
//!
//! 本库遍历目录树，报告满足布尔表达式的路径：
//! - `-name`、`-path`/`-wholename`、`-regex`、`-type` 测试及其忽略大小写版本
//! - `!`/`-not`、`-a`/`-and`（或相邻省略）、`-o`/`-or` 以及括号分组
//! - 可切换的正则方言（`-regextype sed`、`egrep`、`py` 等）
//! - 确定的层序遍历顺序
//!
//! ## 结构
//!
//! - [`expr`]：参数切分、表达式解析与求值
//! - [`finder`]：模式匹配器、遍历选项与层序遍历
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use refind::Finder;
//!
//! // 解析参数：起始路径在前，表达式在后
//! let finder = Finder::from_args(&[".", "-name", "*.rs", "-type", "f"]).unwrap();
//!
//! // 逐个取出匹配的路径
//! for path in finder.iter() {
//!     println!("找到文件: {}", path.display());
//! }
//! ```

pub mod cli;
pub mod errors;
pub mod expr;
pub mod finder;

use std::io::Write;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use finder::Finder;

/// 解析参数并执行查找，匹配的路径逐行写入 `out`
///
/// 表达式有错误时在写出任何内容之前返回错误。
pub fn run<S: AsRef<str>, W: Write>(args: &[S], out: &mut W) -> FindResult<usize> {
    Finder::from_args(args)?.run(out)
}
