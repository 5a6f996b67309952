use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};

use refind::cli::Cli;
use refind::Finder;

fn main() -> Result<ExitCode> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .init();

    info!("开始运行 refind");
    let start_time = Instant::now();

    let args = cli.find_args();
    debug!("参数: {:?}", args);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = Finder::from_args(args.as_slice()).and_then(|finder| finder.run(&mut out));

    match result {
        Ok(_) => {
            info!("搜索完成，耗时 {:.2?}", start_time.elapsed());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if cli.is_verbose() => {
            let kind = err.kind();
            Err(err).with_context(|| format!("{} (参数: {:?})", kind, args))
        }
        Err(err) if err.is_compile_error() => {
            eprintln!("{}", err.summary());
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            // 遍历开始后的致命错误（写出失败）与遍历诊断一样走日志
            error!("{}", err.summary());
            Ok(ExitCode::FAILURE)
        }
    }
}
