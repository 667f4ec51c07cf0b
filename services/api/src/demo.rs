use clap::Args;
use talent_ledger::error::AppError;
use talent_ledger::recruitment::{
    sample, ApplicationStatus, KeywordQuery, ViewGate, ViewState, Workspace,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Narrow the views to applications at this interview round.
    #[arg(long)]
    pub(crate) status: Option<u8>,
    /// Keep only jobs whose title has this whole word (repeatable).
    #[arg(long)]
    pub(crate) keyword: Vec<String>,
    /// Advance every application of the first job by one round before printing.
    #[arg(long)]
    pub(crate) advance: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut workspace = sample::workspace()?;
    println!("Talent ledger demo");
    render_summary(&workspace);

    if args.advance {
        advance_first_job(&mut workspace);
    }

    workspace.set_view_state(ViewState::JobView);
    workspace.require_view(ViewGate::JobFamily)?;

    if !args.keyword.is_empty() {
        let query = KeywordQuery::new(&args.keyword);
        println!("\nJob search: {}", query.keywords().join(", "));
        workspace.push_job_filter(query.job_predicate());
    }
    if let Some(status) = args.status {
        let status = ApplicationStatus::new(status);
        println!("\nStatus filter: round {status}");
        workspace.filter_by_status(status);
    }

    for line in filtered_lines(&workspace) {
        println!("{line}");
    }
    Ok(())
}

fn render_summary(workspace: &Workspace) {
    println!(
        "- {} candidates | {} jobs | {} applications",
        workspace.all_persons().len(),
        workspace.all_jobs().len(),
        workspace.all_applications().len()
    );
}

fn advance_first_job(workspace: &mut Workspace) {
    let Some(job) = workspace.all_jobs().first().map(|job| job.as_ref().clone()) else {
        return;
    };
    let pending: Vec<_> = workspace
        .applications_by_job(&job)
        .into_iter()
        .cloned()
        .collect();

    println!("\nAdvancing applications for {}", job.title);
    for application in pending {
        match workspace.advance_application(&application, 1) {
            Ok(advanced) => println!("  - {advanced}"),
            Err(err) => println!("  - {application}: {err}"),
        }
    }
}

/// Jobs with their visible applications, then the visible candidates.
fn filtered_lines(workspace: &Workspace) -> Vec<String> {
    let mut lines = vec![format!("\nJobs ({})", workspace.view_state())];
    for job in workspace.filtered_jobs() {
        lines.push(format!("- {} ({} rounds)", job.title, job.rounds.get()));
        for application in workspace.filtered_applications_by_job(job) {
            lines.push(format!(
                "    {} | round {}/{}",
                application.person().name,
                application.status(),
                job.rounds.get()
            ));
        }
    }

    lines.push("\nCandidates".to_string());
    for person in workspace.filtered_persons() {
        lines.push(format!("- {} ({}, {})", person.name, person.phone, person.school));
    }
    lines
}
