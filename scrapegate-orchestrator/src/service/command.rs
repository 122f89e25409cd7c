//! Worker command construction
//!
//! Builds the worker invocation as an argument vector. Each user-supplied value
//! is a separate element; nothing is ever joined into a string that a shell
//! would interpret.

use scrapegate_core::domain::log::LogLevel;
use scrapegate_core::domain::scrape::ScrapeRequest;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::diagnostics::DiagnosticSink;
use crate::error::{Result, ScrapeError};
use crate::service::context::ExecutionContext;
use crate::service::naming::RunArtifacts;

/// A ready-to-spawn worker invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    argv: Vec<OsString>,
}

impl WorkerCommand {
    pub fn new<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = vec![program.into()];
        argv.extend(args.into_iter().map(Into::into));
        Self { argv }
    }

    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    /// Value following `flag`, if the flag is present
    ///
    /// Only flag positions are matched, so a value that happens to look like a
    /// flag is skipped together with its own flag.
    #[cfg(test)]
    pub(crate) fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        let mut rest = &self.argv[1..];
        while let [head, tail @ ..] = rest {
            if !head.to_string_lossy().starts_with("--") {
                rest = tail;
                continue;
            }
            let [value, after @ ..] = tail else {
                return None;
            };
            if head == flag {
                return Some(value.as_os_str());
            }
            rest = after;
        }
        None
    }
}

/// Debug-quoted arguments, for logs only
impl fmt::Display for WorkerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.argv.iter().map(|a| format!("{:?}", a)).collect();
        f.write_str(&parts.join(" "))
    }
}

/// Builds worker invocations for a configured entry point
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    worker: PathBuf,
    interpreter: Option<String>,
}

impl CommandBuilder {
    /// # Arguments
    /// * `worker` - Worker entry point
    /// * `interpreter` - Optional program that runs the entry point (e.g. `python3`)
    pub fn new(worker: impl Into<PathBuf>, interpreter: Option<String>) -> Self {
        Self {
            worker: worker.into(),
            interpreter,
        }
    }

    pub fn worker(&self) -> &Path {
        &self.worker
    }

    /// Builds the invocation for one run
    ///
    /// Fails with `WorkerNotFound` when the entry point is missing. A worker
    /// without execute permission is repaired in place; failure to repair is
    /// reported to `sink` but does not fail the build.
    pub async fn build(
        &self,
        request: &ScrapeRequest,
        context: &ExecutionContext,
        artifacts: &RunArtifacts,
        sink: &dyn DiagnosticSink,
    ) -> Result<WorkerCommand> {
        let metadata = match tokio::fs::metadata(&self.worker).await {
            Ok(meta) if meta.is_file() => meta,
            _ => return Err(ScrapeError::WorkerNotFound(self.worker.clone())),
        };

        ensure_executable(&self.worker, &metadata, sink).await;

        let mut args: Vec<OsString> = Vec::new();
        if self.interpreter.is_some() {
            args.push(self.worker.clone().into_os_string());
        }

        args.push("--job-board".into());
        args.push(request.job_board.clone().into());
        args.push("--location".into());
        args.push(request.location.clone().into());
        args.push("--output-dir".into());
        args.push(context.results_dir.clone().into_os_string());
        args.push("--csv-filename".into());
        args.push(artifacts.names.csv_file.clone().into());
        args.push("--json-filename".into());
        args.push(artifacts.names.json_file.clone().into());

        if let Some(keywords) = request.search_keywords() {
            args.push("--keywords".into());
            args.push(keywords.into());
        }

        if let Some(max_pages) = request.max_pages {
            args.push("--max-pages".into());
            args.push(max_pages.to_string().into());
        }

        let program: OsString = match &self.interpreter {
            Some(interpreter) => interpreter.into(),
            None => self.worker.clone().into_os_string(),
        };

        Ok(WorkerCommand::new(program, args))
    }
}

#[cfg(unix)]
async fn ensure_executable(worker: &Path, metadata: &Metadata, sink: &dyn DiagnosticSink) {
    use std::os::unix::fs::PermissionsExt;

    if metadata.permissions().mode() & 0o111 != 0 {
        return;
    }

    sink.write(
        LogLevel::Info,
        &format!("Making worker executable: {}", worker.display()),
    );

    if let Err(e) =
        tokio::fs::set_permissions(worker, std::fs::Permissions::from_mode(0o755)).await
    {
        sink.write(
            LogLevel::Warning,
            &format!(
                "Failed to make worker executable {}: {}",
                worker.display(),
                e
            ),
        );
    }
}

#[cfg(not(unix))]
async fn ensure_executable(_worker: &Path, _metadata: &Metadata, _sink: &dyn DiagnosticSink) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diagnostics::BufferedSink;
    use crate::service::naming::ArtifactNamer;
    use chrono::Utc;

    struct Fixture {
        _base: tempfile::TempDir,
        worker: PathBuf,
        context: ExecutionContext,
        artifacts: RunArtifacts,
    }

    fn fixture() -> Fixture {
        let base = tempfile::tempdir().unwrap();
        let worker = base.path().join("scrape_jobs.py");
        std::fs::write(&worker, "#!/bin/sh\nexit 0\n").unwrap();

        let config = Config::new(base.path().to_path_buf());
        let context = ExecutionContext::from_config(&config);
        let artifacts = ArtifactNamer::new(config.results_dir(), "results").name(Utc::now());

        Fixture {
            _base: base,
            worker,
            context,
            artifacts,
        }
    }

    fn as_strings(command: &WorkerCommand) -> Vec<String> {
        command
            .argv()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_argument_vector() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, None);
        let request = ScrapeRequest::new("careers24", "Cape Town");

        let command = builder
            .build(&request, &fx.context, &fx.artifacts, &BufferedSink::new())
            .await
            .unwrap();

        assert_eq!(
            as_strings(&command),
            vec![
                fx.worker.to_string_lossy().to_string(),
                "--job-board".to_string(),
                "careers24".to_string(),
                "--location".to_string(),
                "Cape Town".to_string(),
                "--output-dir".to_string(),
                fx.context.results_dir.to_string_lossy().to_string(),
                "--csv-filename".to_string(),
                fx.artifacts.names.csv_file.clone(),
                "--json-filename".to_string(),
                fx.artifacts.names.json_file.clone(),
            ]
        );
    }

    #[tokio::test]
    async fn test_interpreter_comes_first() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, Some("python3".to_string()));

        let command = builder
            .build(
                &ScrapeRequest::new("pnet", "Durban"),
                &fx.context,
                &fx.artifacts,
                &BufferedSink::new(),
            )
            .await
            .unwrap();

        assert_eq!(command.program(), "python3");
        assert_eq!(command.args()[0], fx.worker.as_os_str());
        assert_eq!(command.args()[1], "--job-board");
    }

    #[tokio::test]
    async fn test_keywords_only_when_non_empty() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, None);
        let sink = BufferedSink::new();

        let empty = ScrapeRequest::new("indeed", "Pretoria").with_keywords("");
        let command = builder
            .build(&empty, &fx.context, &fx.artifacts, &sink)
            .await
            .unwrap();
        assert!(command.flag_value("--keywords").is_none());

        let with = ScrapeRequest::new("indeed", "Pretoria").with_keywords("data engineer");
        let command = builder
            .build(&with, &fx.context, &fx.artifacts, &sink)
            .await
            .unwrap();
        assert_eq!(command.flag_value("--keywords").unwrap(), "data engineer");
    }

    #[tokio::test]
    async fn test_max_pages_flag() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, None);
        let request = ScrapeRequest::new("indeed", "Pretoria").with_max_pages(4);

        let command = builder
            .build(&request, &fx.context, &fx.artifacts, &BufferedSink::new())
            .await
            .unwrap();
        assert_eq!(command.flag_value("--max-pages").unwrap(), "4");
    }

    #[tokio::test]
    async fn test_hostile_values_stay_single_arguments() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, None);
        let location = "Cape Town\"; rm -rf / #";
        let keywords = "$(reboot) `id` && echo pwned";
        let request = ScrapeRequest::new("careers24", location).with_keywords(keywords);

        let command = builder
            .build(&request, &fx.context, &fx.artifacts, &BufferedSink::new())
            .await
            .unwrap();

        assert_eq!(command.flag_value("--location").unwrap(), location);
        assert_eq!(command.flag_value("--keywords").unwrap(), keywords);
        assert_eq!(command.argv().len(), 13);
    }

    #[tokio::test]
    async fn test_flag_like_values_are_not_flags() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, None);
        let request = ScrapeRequest::new("--json-filename", "--output-dir");

        let command = builder
            .build(&request, &fx.context, &fx.artifacts, &BufferedSink::new())
            .await
            .unwrap();

        assert_eq!(command.flag_value("--job-board").unwrap(), "--json-filename");
        assert_eq!(
            command.flag_value("--json-filename").unwrap(),
            fx.artifacts.names.json_file.as_str()
        );
        assert_eq!(
            command.flag_value("--output-dir").unwrap(),
            fx.context.results_dir.as_os_str()
        );
    }

    #[tokio::test]
    async fn test_filenames_match_artifacts() {
        let fx = fixture();
        let builder = CommandBuilder::new(&fx.worker, None);

        let command = builder
            .build(
                &ScrapeRequest::new("careers24", "Cape Town"),
                &fx.context,
                &fx.artifacts,
                &BufferedSink::new(),
            )
            .await
            .unwrap();

        let output_dir = PathBuf::from(command.flag_value("--output-dir").unwrap());
        let json_file = command.flag_value("--json-filename").unwrap();
        let csv_file = command.flag_value("--csv-filename").unwrap();

        assert_eq!(output_dir.join(json_file), fx.artifacts.json_path);
        assert_eq!(output_dir.join(csv_file), fx.artifacts.csv_path);
    }

    #[tokio::test]
    async fn test_missing_worker() {
        let fx = fixture();
        let builder = CommandBuilder::new(fx.worker.with_file_name("missing.py"), None);

        let err = builder
            .build(
                &ScrapeRequest::new("careers24", "Cape Town"),
                &fx.context,
                &fx.artifacts,
                &BufferedSink::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::WorkerNotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_repairs_execute_permission() {
        use std::os::unix::fs::PermissionsExt;

        let fx = fixture();
        std::fs::set_permissions(&fx.worker, std::fs::Permissions::from_mode(0o644)).unwrap();
        let sink = BufferedSink::new();

        CommandBuilder::new(&fx.worker, None)
            .build(
                &ScrapeRequest::new("careers24", "Cape Town"),
                &fx.context,
                &fx.artifacts,
                &sink,
            )
            .await
            .unwrap();

        let mode = std::fs::metadata(&fx.worker).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert!(
            sink.entries_at(LogLevel::Info)
                .iter()
                .any(|e| e.message.starts_with("Making worker executable"))
        );
    }
}
