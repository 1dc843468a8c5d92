use crate::infra::{
    default_policy, default_questions, default_slots, InMemoryApplicantRepository,
    InMemorySlotRepository,
};
use crate::schedule::render_summary;
use clap::Args;
use interview_desk::config::RecruitmentConfig;
use interview_desk::error::AppError;
use interview_desk::workflows::recruitment::applicants::{
    ApplicantStatus, ApplicationSubmission, RecruitmentService, SubmittedAnswer,
};
use interview_desk::workflows::recruitment::scheduling::{write_csv, SlotRoster};
use interview_desk::workflows::recruitment::SlotId;
use std::io;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Interview location substituted into invitation e-mails
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Stop after the preview instead of saving placements
    #[arg(long)]
    pub(crate) skip_commit: bool,
    /// Print the preview as CSV instead of a text summary
    #[arg(long)]
    pub(crate) csv: bool,
}

struct DemoApplicant {
    first_name: &'static str,
    last_name: &'static str,
    major: &'static str,
    slots: &'static [&'static str],
    invite: bool,
}

const COHORT: &[DemoApplicant] = &[
    DemoApplicant {
        first_name: "Maya",
        last_name: "Chen",
        major: "Computer Science",
        slots: &["tue-1000", "thu-1100"],
        invite: true,
    },
    DemoApplicant {
        first_name: "Jonah",
        last_name: "Okafor",
        major: "Economics",
        slots: &["mon-0900", "mon-1300", "tue-1000", "wed-1500"],
        invite: true,
    },
    DemoApplicant {
        first_name: "Priya",
        last_name: "Natarajan",
        major: "Statistics",
        slots: &["tue-1000", "thu-1100"],
        invite: true,
    },
    DemoApplicant {
        first_name: "Luis",
        last_name: "Ortega",
        major: "Mechanical Engineering",
        slots: &["tue-1000", "thu-1100"],
        invite: true,
    },
    DemoApplicant {
        first_name: "Sam",
        last_name: "Whitfield",
        major: "History",
        slots: &["mon-0900", "wed-1500"],
        invite: false,
    },
];

fn demo_submission(applicant: &DemoApplicant) -> ApplicationSubmission {
    let answers = default_questions()
        .into_iter()
        .map(|question| SubmittedAnswer {
            question_id: question.id,
            answer: format!(
                "{} studies {} and answered: {}",
                applicant.first_name, applicant.major, question.question
            ),
        })
        .collect();

    ApplicationSubmission {
        first_name: applicant.first_name.to_string(),
        last_name: applicant.last_name.to_string(),
        email: format!(
            "{}.{}@campus.example.edu",
            applicant.first_name.to_lowercase(),
            applicant.last_name.to_lowercase()
        ),
        phone: "555-0142".to_string(),
        major: applicant.major.to_string(),
        graduation_year: 2027,
        resume_url: None,
        frq_responses: answers,
        available_slots: applicant.slots.iter().map(|id| SlotId::new(*id)).collect(),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        location,
        skip_commit,
        csv,
    } = args;

    let config = RecruitmentConfig {
        cycle_name: "Demo cycle".to_string(),
        minimum_available_slots: 2,
        ..RecruitmentConfig::default()
    };
    let service = RecruitmentService::new(
        Arc::new(InMemoryApplicantRepository::default()),
        Arc::new(InMemorySlotRepository::new(default_slots())),
        default_policy(&config),
    );

    println!("Interview desk demo ({})", service.policy().cycle_name);
    println!("\nIntake");
    for applicant in COHORT {
        let stored = service.submit(demo_submission(applicant))?;
        let next = if applicant.invite {
            ApplicantStatus::Interviewing
        } else {
            ApplicantStatus::Rejected
        };
        let stored = service.transition(&stored.id, next)?;
        println!(
            "- {} ({}) -> {}",
            stored.full_name(),
            stored.id,
            stored.status.label()
        );
    }

    let mut late = demo_submission(&COHORT[0]);
    late.email = "not-an-address".to_string();
    if let Err(err) = service.submit(late) {
        println!("- rejected at intake: {err}");
    }

    let preview = service.preview_auto_assignment()?;
    println!();
    if csv {
        write_csv(&preview, io::stdout().lock())?;
    } else {
        render_summary(&preview, &mut io::stdout().lock())?;
    }

    if skip_commit {
        println!("\nPreview only; no placements saved.");
        return Ok(());
    }

    let report = service.commit_auto_assignment()?;
    println!(
        "\nCommitted: {} scheduled | {} failed | {} unplaceable",
        report.scheduled.len(),
        report.failed.len(),
        report.unplaceable.len()
    );

    println!("\nSlot roster");
    for entry in service.roster()? {
        render_roster_entry(&entry);
    }

    println!("\nOutreach");
    for group in service.outreach(location.as_deref())? {
        println!("- {} ({} recipients)", group.label, group.recipients.len());
        println!("  {}", group.body);
    }

    Ok(())
}

fn render_roster_entry(entry: &SlotRoster) {
    let names: Vec<&str> = entry
        .applicants
        .iter()
        .map(|applicant| applicant.name.as_str())
        .collect();
    let status = if entry.is_full() { "full" } else { "open" };
    println!(
        "- {}: {}/{} seats, {} [{}]",
        entry.slot.describe(),
        entry.occupied,
        entry.slot.max_capacity,
        status,
        names.join(", ")
    );
}
