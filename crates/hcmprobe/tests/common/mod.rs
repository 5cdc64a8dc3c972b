//! Shared plumbing for the live-browser scenarios: session setup, verdict
//! recording, and guaranteed teardown.

use hcmprobe::{
    config, FileReport, OutcomeRecord, ReportSink, Session, SuiteConfig, SuiteResult, WaitOptions,
};

/// Whether this run drives a live browser; prints a skip note otherwise
pub fn e2e_enabled() -> bool {
    hcmprobe::init_tracing();
    config::e2e_enabled()
}

/// Record a skipped scenario and explain how to enable it
pub fn skip(name: &str) {
    let config = SuiteConfig::from_env();
    record(&config, &OutcomeRecord::skipped(name));
    eprintln!(
        "[SKIP] {name} requires {}=1 and --features browser",
        config::E2E_ENV
    );
}

/// Open a session on the login page
pub async fn open_login(config: &SuiteConfig) -> SuiteResult<Session> {
    let session = Session::acquire(config.session()).await?;
    session.goto(&config.login_url()).await?;
    session.wait_document_ready(WaitOptions::read()).await?;
    Ok(session)
}

/// Append one outcome line, best-effort
pub fn record(config: &SuiteConfig, outcome: &OutcomeRecord) {
    if let Err(e) = FileReport::new(&config.report_path).record(outcome) {
        eprintln!("report write failed: {e}");
    }
}

/// Record the verdict, release the session (screenshot on failure), and
/// re-raise the scenario failure
pub async fn finish(
    name: &str,
    config: &SuiteConfig,
    session: Session,
    outcome: SuiteResult<()>,
) {
    let failed = outcome.is_err();
    let verdict = if failed {
        OutcomeRecord::failed(name)
    } else {
        OutcomeRecord::passed(name)
    };
    record(config, &verdict);

    if let Err(e) = session.release(name, failed).await {
        eprintln!("session release failed: {e}");
    }

    if let Err(e) = outcome {
        panic!("{name} failed: {e}");
    }
}
