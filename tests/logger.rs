//! Tests for logger functionality.

use chrono::{DateTime, Local, TimeZone, Timelike};
use linelog::conflict::{ConflictPolicy, NoPrompt, Outcome, ScriptedPrompt};
use linelog::{Error, FixedClock, Level, LogStatus, Logger, LoggerBuilder, LoggerConfig};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const STAMP: &str = "2024-01-02 | 03:04:05.000006";

fn instant() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .unwrap()
        .with_nanosecond(6_000)
        .unwrap()
}

fn builder(dir: &Path) -> LoggerBuilder {
    Logger::builder()
        .directory(dir)
        .clock(FixedClock(instant()))
        .prompt(NoPrompt)
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn builder_defaults() {
    let logger = Logger::builder().prompt(NoPrompt).build_paused().unwrap();
    let config = logger.config();
    assert_eq!(config.filename, "main.log");
    assert_eq!(config.default_level, Level::Info);
    assert_eq!(config.timestamp_pattern, "%Y-%m-%d | %H:%M:%S.%f");
    assert_eq!(
        config.line_template.as_str(),
        "[{timestamp}] {logtype}: {message}"
    );
    assert_eq!(config.existing_file_policy, ConflictPolicy::Append);
    assert!(config.prefix.is_empty() && config.postfix.is_empty());
    assert!(!logger.is_enabled());
}

#[test]
fn build_provisions_and_enables() {
    let tmp = TempDir::new().unwrap();
    let logger = builder(tmp.path()).build().unwrap();

    assert!(logger.is_enabled());
    assert!(tmp.path().join("main.log").is_file());
    assert_eq!(logger.path(), tmp.path().join("main.log"));
}

#[test]
fn logs_default_template_line() {
    let tmp = TempDir::new().unwrap();
    let logger = builder(tmp.path()).build().unwrap();

    assert_eq!(logger.warning("disk low"), LogStatus::Written);

    assert_eq!(
        read_lines(&logger.path()),
        vec![format!("[{STAMP}] warning: disk low")]
    );
}

#[test]
fn each_level_entry_point_uses_its_name() {
    let tmp = TempDir::new().unwrap();
    let logger = builder(tmp.path())
        .line_template("{logtype}|{message}")
        .build()
        .unwrap();

    logger.info("a");
    logger.warning("b");
    logger.error("c");
    logger.fatal("d");
    logger.log(Level::Error, "e");

    assert_eq!(
        read_lines(&logger.path()),
        vec!["info|a", "warning|b", "error|c", "fatal|d", "error|e"]
    );
}

#[test]
fn log_default_routes_to_configured_level() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path())
        .line_template("{logtype}|{message}")
        .default_level(Level::Error)
        .build()
        .unwrap();

    logger.log_default("first");
    logger.set_default_level(Level::Fatal);
    logger.resume().unwrap();
    logger.log_default("second");

    assert_eq!(read_lines(&logger.path()), vec!["error|first", "fatal|second"]);
}

#[test]
fn prefix_and_postfix_are_rendered() {
    let tmp = TempDir::new().unwrap();
    let logger = builder(tmp.path())
        .line_template("{prefix}[{timestamp}] {logtype}: {message}{postfix}")
        .prefix(">> ")
        .postfix(" <<")
        .build()
        .unwrap();

    assert_eq!(
        logger.render(Level::Info, "hi"),
        format!(">> [{STAMP}] info: hi <<")
    );
}

#[test]
fn lines_are_written_in_call_order() {
    let tmp = TempDir::new().unwrap();
    let logger = builder(tmp.path()).build().unwrap();

    let messages: Vec<String> = (0..25).map(|i| format!("message {i}")).collect();
    for message in &messages {
        logger.info(message);
    }

    let expected: Vec<String> = messages
        .iter()
        .map(|m| format!("[{STAMP}] info: {m}"))
        .collect();
    assert_eq!(read_lines(&logger.path()), expected);
}

#[test]
fn setters_pause_until_resume() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path()).build().unwrap();

    logger.set_prefix("p");
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_postfix("q");
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_line_template("{message}").unwrap();
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_timestamp_pattern("%H").unwrap();
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_existing_file_policy(ConflictPolicy::Overwrite);
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_default_level(Level::Warning);
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_filename("other.log").unwrap();
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    logger.set_directory(tmp.path().join("sub"));
    assert!(!logger.is_enabled());
    logger.resume().unwrap();

    assert!(logger.is_enabled());
    assert!(tmp.path().join("sub").join("other.log").is_file());
}

#[test]
fn pause_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path()).build().unwrap();

    logger.pause();
    let config = logger.config().clone();
    logger.pause();

    assert!(!logger.is_enabled());
    assert_eq!(logger.config(), &config);
}

#[test]
fn resume_when_enabled_is_noop() {
    let tmp = TempDir::new().unwrap();
    let prompt = ScriptedPrompt::answers(["o"]);
    fs::write(tmp.path().join("main.log"), "keep\n").unwrap();
    let mut logger = builder(tmp.path()).prompt(prompt.clone()).build().unwrap();

    logger.resume().unwrap();

    // Only the first provisioning asked.
    assert_eq!(prompt.asked().len(), 1);
}

#[test]
fn disabled_logging_is_silent() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path()).build().unwrap();
    logger.info("before");
    logger.pause();

    let len = fs::metadata(logger.path()).unwrap().len();
    assert_eq!(logger.info("ignored"), LogStatus::Disabled);
    assert_eq!(logger.fatal("ignored"), LogStatus::Disabled);
    assert_eq!(fs::metadata(logger.path()).unwrap().len(), len);
}

#[test]
fn invalid_option_leaves_state_unchanged() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path()).build().unwrap();
    let before = logger.config().clone();

    let err = logger.set_option("default_level", "verbose").unwrap_err();
    assert!(matches!(err, Error::Config(linelog::ConfigError::InvalidLevel(_))));

    let err = logger
        .set_option("existing_file_policy", "shred")
        .unwrap_err();
    assert!(matches!(err, Error::Config(linelog::ConfigError::InvalidPolicy(_))));

    let err = logger.set_option("colour", "red").unwrap_err();
    assert!(matches!(err, Error::Config(linelog::ConfigError::UnknownOption(_))));

    let err = logger.set_line_template("{when} {message}").unwrap_err();
    assert!(matches!(err, Error::Template(_)));

    let err = logger.set_filename("").unwrap_err();
    assert!(matches!(err, Error::Config(linelog::ConfigError::Empty(_))));

    let err = logger.set_filename("../escape.log").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(linelog::ConfigError::InvalidFilename(_))
    ));

    let err = logger.set_timestamp_pattern("").unwrap_err();
    assert!(matches!(err, Error::Config(linelog::ConfigError::Empty(_))));

    assert!(logger.is_enabled());
    assert_eq!(logger.config(), &before);
}

#[test]
fn set_option_applies_valid_values() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path()).build().unwrap();

    logger.set_option("default-level", "FATAL").unwrap();
    logger.set_option("policy", "r").unwrap();
    logger.set_option("template", "{logtype}:{message}").unwrap();
    assert!(!logger.is_enabled());

    assert_eq!(logger.config().default_level, Level::Fatal);
    assert_eq!(logger.config().existing_file_policy, ConflictPolicy::Rename);
    assert_eq!(logger.render(Level::Info, "x"), "info:x");
}

#[test]
fn reconfigure_validates_then_pauses() {
    let tmp = TempDir::new().unwrap();
    let mut logger = builder(tmp.path()).build().unwrap();

    let mut bad = logger.config().clone();
    bad.filename = String::new();
    assert!(logger.reconfigure(bad).is_err());
    assert!(logger.is_enabled());

    let mut good = logger.config().clone();
    good.filename = "next.log".to_string();
    logger.reconfigure(good).unwrap();
    assert!(!logger.is_enabled());

    logger.resume().unwrap();
    logger.info("x");
    assert_eq!(read_lines(&tmp.path().join("next.log")).len(), 1);
}

#[test]
fn existing_file_without_answer_uses_default_policy() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("main.log");
    fs::write(&path, "old\n").unwrap();

    let logger = builder(tmp.path())
        .existing_file_policy(ConflictPolicy::Overwrite)
        .prompt(ScriptedPrompt::new([None::<&str>]))
        .build()
        .unwrap();
    logger.info("new");

    let resolution = logger.last_resolution().unwrap();
    assert_eq!(resolution.policy, ConflictPolicy::Overwrite);
    assert_eq!(resolution.outcome, Outcome::TimedOut);
    assert_eq!(read_lines(&path), vec![format!("[{STAMP}] info: new")]);
}

#[test]
fn answer_o_truncates_before_next_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("main.log");
    fs::write(&path, "old 1\nold 2\n").unwrap();

    let logger = builder(tmp.path())
        .line_template("{message}")
        .prompt(ScriptedPrompt::answers(["o"]))
        .build()
        .unwrap();
    logger.info("fresh");

    assert_eq!(read_lines(&path), vec!["fresh"]);
}

#[test]
fn answer_r_preserves_previous_contents() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("main.log");
    fs::write(&path, "old\n").unwrap();

    let logger = builder(tmp.path())
        .line_template("{message}")
        .prompt(ScriptedPrompt::answers(["r"]))
        .build()
        .unwrap();
    logger.info("fresh");

    let moved = logger.renamed_to().unwrap().to_path_buf();
    assert_ne!(moved, path);
    assert_eq!(fs::read_to_string(moved).unwrap(), "old\n");
    assert_eq!(read_lines(&path), vec!["fresh"]);
}

#[test]
fn exhausted_answers_fall_back_to_default() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("main.log");
    fs::write(&path, "old\n").unwrap();

    let logger = builder(tmp.path())
        .line_template("{message}")
        .prompt(ScriptedPrompt::answers(["maybe", "no", "?"]))
        .build()
        .unwrap();
    logger.info("new");

    assert_eq!(
        logger.last_resolution().unwrap().outcome,
        Outcome::AttemptsExhausted
    );
    assert_eq!(read_lines(&path), vec!["old", "new"]);
}

#[test]
fn changed_path_is_checked_again_on_resume() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("second.log"), "old\n").unwrap();
    let prompt = ScriptedPrompt::default();
    let mut logger = builder(tmp.path()).prompt(prompt.clone()).build().unwrap();
    assert!(prompt.asked().is_empty());

    logger.set_filename("second.log").unwrap();
    prompt.push(Some("o"));
    logger.resume().unwrap();

    assert_eq!(prompt.asked().len(), 1);
    assert!(prompt.asked()[0].contains("second.log"));
    assert_eq!(fs::metadata(tmp.path().join("second.log")).unwrap().len(), 0);
}

#[test]
fn resume_failure_keeps_logger_paused() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("file");
    fs::write(&blocker, "").unwrap();

    let mut logger = builder(&blocker).build_paused().unwrap();
    let err = logger.resume().unwrap_err();

    assert!(matches!(err, Error::Provisioning { .. }));
    assert!(!logger.is_enabled());
    assert_eq!(logger.info("lost"), LogStatus::Disabled);

    logger.set_directory(tmp.path());
    logger.resume().unwrap();
    assert!(logger.is_enabled());
}

#[test]
fn build_rejects_bad_template() {
    let tmp = TempDir::new().unwrap();
    let err = builder(tmp.path())
        .line_template("{oops}")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Template(_)));
    assert!(!tmp.path().join("main.log").exists());
}

#[test]
fn builder_string_options() {
    let tmp = TempDir::new().unwrap();
    let logger = builder(tmp.path())
        .option("filename", "opts.log")
        .option("level", "warning")
        .build()
        .unwrap();
    assert_eq!(logger.config().default_level, Level::Warning);
    assert!(tmp.path().join("opts.log").is_file());

    assert!(builder(tmp.path()).option("level", "loud").build().is_err());
}

#[test]
fn new_uses_given_config() {
    let tmp = TempDir::new().unwrap();
    let config = LoggerConfig {
        directory: tmp.path().to_path_buf(),
        filename: "cfg.log".to_string(),
        existing_file_policy: ConflictPolicy::Append,
        ..LoggerConfig::default()
    };
    let logger = Logger::new(config).unwrap();
    assert!(logger.is_enabled());
    assert!(tmp.path().join("cfg.log").is_file());
}

#[test]
fn concurrent_logging_keeps_lines_whole() {
    let tmp = TempDir::new().unwrap();
    let logger = Arc::new(
        builder(tmp.path())
            .line_template("{message}")
            .build()
            .unwrap(),
    );

    let threads: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..50 {
                    logger.info(&format!("thread-{t}-line-{i}-{}", "x".repeat(64)));
                }
            })
        })
        .collect();
    for handle in threads {
        handle.join().unwrap();
    }

    let lines = read_lines(&logger.path());
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|l| l.starts_with("thread-") && l.ends_with(&"x".repeat(64))));
}

#[cfg(target_os = "linux")]
#[test]
fn write_failures_are_reported_not_raised() {
    if !Path::new("/dev/full").exists() {
        return;
    }
    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reported);

    let logger = Logger::builder()
        .directory("/dev")
        .filename("full")
        .prompt(NoPrompt)
        .on_error(move |e| sink.lock().unwrap().push(e.to_string()))
        .build()
        .unwrap();

    assert_eq!(logger.error("no space"), LogStatus::Failed);
    let reported = reported.lock().unwrap();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("/dev/full"));
}

#[test]
fn directory_setters_agree_with_directory_option() {
    let tmp = TempDir::new().unwrap();
    let mut direct = builder(tmp.path()).build_paused().unwrap();
    let mut by_name = builder(tmp.path()).build_paused().unwrap();

    direct.set_directory("~/logs");
    by_name.set_option("directory", "~/logs").unwrap();
    assert_eq!(direct.config().directory, by_name.config().directory);
    assert!(!direct.config().directory.starts_with("~"));
    let expanded = by_name.config().directory.clone();

    direct.set_directory("");
    by_name.set_option("directory", "").unwrap();
    assert_eq!(direct.config().directory, Path::new("."));
    assert_eq!(by_name.config().directory, Path::new("."));

    let built = LoggerBuilder::new()
        .directory("~/logs")
        .prompt(NoPrompt)
        .build_paused()
        .unwrap();
    assert_eq!(built.config().directory, expanded);
}
