//! 文件系统遍历功能
//!
//! 按层序（广度优先）遍历每个起始路径：先报告起始路径本身，
//! 然后按发现顺序逐个列出目录，每个目录的子条目按名称字节序排序。
//! 符号链接只作为条目报告，从不跟随。

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use super::entry::{EntryKind, VisitedEntry};
use super::options::FindOptions;
use crate::errors::FindError;
use crate::expr::{EvalContext, Expr};

/// 惰性的层序遍历器，逐个产出需要报告的路径
///
/// 只能消费一次。目录不可读等错误记录为诊断信息后继续遍历。
pub struct FileWalker<'a> {
    expr: &'a Expr,
    options: &'a FindOptions,
    implicit_print: bool,
    roots: VecDeque<PathBuf>,
    directories: VecDeque<(PathBuf, usize)>,
    pending: VecDeque<VisitedEntry>,
    ready: VecDeque<PathBuf>,
    diagnostics: usize,
    tests_run: usize,
}

impl<'a> FileWalker<'a> {
    /// 使用给定的起始路径、表达式和选项创建遍历器
    pub fn new<I, P>(roots: I, expr: &'a Expr, options: &'a FindOptions) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            expr,
            options,
            implicit_print: !expr.has_action(),
            roots: roots.into_iter().map(Into::into).collect(),
            directories: VecDeque::new(),
            pending: VecDeque::new(),
            ready: VecDeque::new(),
            diagnostics: 0,
            tests_run: 0,
        }
    }

    /// 到目前为止记录的非致命错误数
    pub fn diagnostics(&self) -> usize {
        self.diagnostics
    }

    /// 到目前为止执行的谓词测试次数
    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    /// 载入起始路径本身（不跟随符号链接）
    fn start(&mut self, root: PathBuf) {
        debug!("Starting search in {}", root.display());
        let mut walker = WalkDir::new(&root)
            .max_depth(0)
            .follow_root_links(false)
            .into_iter();

        match walker.next() {
            Some(Ok(entry)) => self.pending.push_back(VisitedEntry::from_dir_entry(&entry, 0)),
            Some(Err(err)) => self.record(err.into()),
            None => {}
        }
    }

    /// 列出一个目录的直接子条目，按名称排序后排入待访问队列
    fn list_directory(&mut self, dir: &Path, depth: usize) {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let before = self.pending.len();
        for entry in walker {
            match entry {
                Ok(entry) => self
                    .pending
                    .push_back(VisitedEntry::from_dir_entry(&entry, depth + 1)),
                Err(err) => self.record(err.into()),
            }
        }
        debug!("Listed {} entries in {}", self.pending.len() - before, dir.display());
    }

    /// 对单个条目求值，决定是否报告以及报告几次
    fn visit(&mut self, entry: VisitedEntry) {
        if entry.kind() == EntryKind::Directory && self.options.descends_below(entry.depth()) {
            self.directories
                .push_back((entry.path().to_path_buf(), entry.depth()));
        }
        if !self.options.evaluates_at(entry.depth()) {
            return;
        }

        let mut ctx = EvalContext::default();
        let matched = self.expr.evaluate(&entry, &mut ctx);
        self.tests_run += ctx.tests_run;

        let times = if self.implicit_print {
            usize::from(matched)
        } else {
            ctx.prints
        };
        if times == 0 {
            return;
        }
        let path = entry.into_path();
        for _ in 1..times {
            self.ready.push_back(path.clone());
        }
        self.ready.push_back(path);
    }

    fn record(&mut self, err: FindError) {
        warn!("{}", err);
        self.diagnostics += 1;
    }
}

impl<'a> Iterator for FileWalker<'a> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.ready.pop_front() {
                return Some(path);
            }
            if let Some(entry) = self.pending.pop_front() {
                self.visit(entry);
                continue;
            }
            if let Some((dir, depth)) = self.directories.pop_front() {
                self.list_directory(&dir, depth);
                continue;
            }
            let root = self.roots.pop_front()?;
            self.start(root);
        }
    }
}
