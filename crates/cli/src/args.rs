// crates/cli/src/args.rs
use crate::options::{OutputFormat, Verbosity};
use crate::parsers;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "projscan",
    version = crate::VERSION,
    about = "C++Builder プロジェクト (.cbproj) とソースツリーの集計ツール"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: CommandArgs,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub behavior: BehaviorOptions,
}

#[derive(Subcommand, Debug)]
pub enum CommandArgs {
    /// ファイル数・ディレクトリ数・合計サイズ (KB) を集計
    Count {
        /// 対象ディレクトリ
        #[arg(value_hint = ValueHint::DirPath)]
        directory: PathBuf,
    },
    /// 指定拡張子のファイル一覧（パス・更新日時・サイズ）
    Show {
        /// 対象ディレクトリ
        #[arg(value_hint = ValueHint::DirPath)]
        directory: PathBuf,

        /// 拡張子 (カンマ区切り, 例: .cpp,.h)。省略時は .cpp,.h,.dfm,.fmx,.cbproj,.c,.hpp
        #[arg(long, value_delimiter = ',', value_parser = parsers::parse_extension)]
        ext: Vec<String>,
    },
    /// プロジェクトファイルを解析し、コンパイル単位ごとの行数を出力
    Parse {
        /// 対象ディレクトリ
        #[arg(value_hint = ValueHint::DirPath)]
        directory: PathBuf,

        /// プロジェクトファイルの拡張子 (カンマ区切り)。省略時は .cbproj
        #[arg(long, value_delimiter = ',', value_parser = parsers::parse_extension)]
        ext: Vec<String>,
    },
}

/// Output-related options
#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "tsv", global = true, help_heading = "出力")]
    pub format: OutputFormat,

    /// TSV/CSV の先頭に見出し行を出力
    #[arg(long, global = true, help_heading = "出力")]
    pub header: bool,

    /// 出力先ファイル（省略時は標準出力）
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath, global = true, help_heading = "出力")]
    pub output: Option<PathBuf>,
}

/// Traversal and diagnostics options
#[derive(ClapArgs, Debug)]
pub struct BehaviorOptions {
    /// サブディレクトリを走査しない
    #[arg(long, global = true, help_heading = "走査")]
    pub no_recursive: bool,

    /// 詳細ログ (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help_heading = "ログ")]
    pub verbose: u8,

    /// 警告以上のみ表示
    #[arg(short, long, conflicts_with = "verbose", global = true, help_heading = "ログ")]
    pub quiet: bool,
}

impl BehaviorOptions {
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
