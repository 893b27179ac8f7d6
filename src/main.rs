use anyhow::Context;
use boletin::adapters::{LinePrompt, TerminalView, ToastPresenter};
use boletin::app::commands::{parse_command, Command, HELP};
use boletin::app::shortcuts::{self, Keymap};
use boletin::core::statistics;
use boletin::domain::ports::{Notifier, View};
use boletin::utils::logger;
use boletin::{BoletinController, CliConfig, GradeStore, NotificationService};
use clap::Parser;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 通知計時器由工作執行緒驅動，主執行緒阻塞於 stdin
    let runtime = tokio::runtime::Runtime::new().context("failed to start the timer runtime")?;
    let notifications =
        NotificationService::with_runtime(config.timings(), runtime.handle().clone())
            .with_presenter(Arc::new(ToastPresenter::new(std::io::stdout())));

    // 創建成績存儲與控制器
    let store = GradeStore::with_grades(config.rules(), &config.grades.initial)
        .context("invalid initial grades")?;
    let mut controller = BoletinController::new(store, TerminalView::new(std::io::stdout()), notifications)
        .with_date_format(config.display.date_format.clone());
    controller.start().context("failed to start")?;

    let keymap = Keymap::default();
    println!("Shortcuts: {}. Type 'help' for commands.", keymap.describe());

    // 命令迴圈
    let stdin = std::io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock(), std::io::stdout());
    while let Some(line) = prompt.read_line(">") {
        match parse_command(&line, &keymap) {
            Ok(Command::Quit) => break,
            Ok(command) => run_command(&mut controller, command, &mut prompt)?,
            Err(message) => eprintln!("{}", message),
        }
    }

    tracing::info!("boletin finished");
    runtime.shutdown_timeout(Duration::from_millis(100));
    Ok(())
}

fn run_command<V, N, R, W>(
    controller: &mut BoletinController<V, N>,
    command: Command,
    prompt: &mut LinePrompt<R, W>,
) -> anyhow::Result<()>
where
    V: View,
    N: Notifier,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Add(Some(value)) => controller.on_add_grade(&value),
        Command::Add(None) => controller.on_add_grade_prompt(prompt),
        Command::Remove(index) => controller.on_remove_grade(index, prompt),
        Command::Average => controller.on_calculate_average(),
        Command::Highest => controller.on_find_highest(),
        Command::Failures => controller.on_check_failures(),
        Command::Shortcut(action) => shortcuts::dispatch(controller, action, prompt),
        Command::List => controller.render(),
        Command::Stats => match controller.export_data().statistics {
            Some(stats) => println!(
                "Count: {}  Average: {}  Highest: {}  Lowest: {}  Failing: {}  Passing: {}",
                stats.count,
                statistics::format_average(stats.average),
                stats.highest,
                stats.lowest,
                stats.failure_count,
                stats.passing_count
            ),
            None => println!("No grades yet."),
        },
        Command::Export => {
            let json = serde_json::to_string_pretty(&controller.export_data())
                .context("failed to serialize export")?;
            println!("{}", json);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit | Command::Empty => {}
    }
    Ok(())
}
