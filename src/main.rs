use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;
use chrono::Local;
use clap::Parser;

use instructor_schedules::calendar::{self, layout::GridLayout, CalendarRenderer};
use instructor_schedules::info::InstructorCache;
use instructor_schedules::office_hours::{self, UnknownInstructorPolicy};
use instructor_schedules::{group, timetable, utils, workbook};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Schedule listing of the department
    #[clap(long, default_value = "https://schedules.calpoly.edu/subject_IME_next.htm")]
    url: String,

    /// Workbook holding the template sheet
    #[clap(short, long, value_name = "FILE", default_value = "template.xlsx")]
    template: PathBuf,

    /// Name of the sheet copied for every instructor
    #[clap(long, value_name = "SHEET", default_value = "Template")]
    template_sheet: String,

    /// Office hours table (name, days, start_time, end_time, location)
    #[clap(short, long, value_name = "FILE", default_value = "office_hours.csv")]
    office_hours: PathBuf,

    /// Don't read any office hours
    #[clap(long)]
    no_office_hours: bool,

    /// Where the dated workbook is written
    #[clap(short = 'd', long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// What to do with office hours of an instructor absent from the schedule
    #[clap(short, long, value_enum, default_value_t = UnknownInstructorPolicy::Abort)]
    unknown_instructor: UnknownInstructorPolicy,

    /// Timeout of each request, in seconds. Waits forever by default
    #[clap(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();

    let mut book = workbook::load_template(&args.template, &args.template_sheet)
        .context("Can't load the template workbook")?;

    let user_agent = format!("instructor-schedules/{}", env!("CARGO_PKG_VERSION"));
    let client = utils::make_client(&user_agent, args.timeout.map(Duration::from_secs))?;

    let mut cache = InstructorCache::new();
    let courses = timetable::courses(&client, &mut cache, &args.url)
        .await
        .context("Can't reach the schedule website")?;
    log::info!(
        "{} courses taught by {} instructors",
        courses.len(),
        cache.len()
    );
    if cache.is_empty() {
        log::warn!("No scheduled course found on {}", args.url);
    }

    let mut groups = group::group_courses_by(courses, group::by_instructor_name)?;

    if args.no_office_hours {
        log::info!("Office hours skipped");
    } else {
        let entries = office_hours::read_office_hours_file(&args.office_hours)
            .with_context(|| format!("Can't read {}", args.office_hours.display()))?;
        let merged = office_hours::merge_office_hours(
            &mut groups,
            entries,
            args.unknown_instructor,
            office_hours::confirm_skip,
        )?;
        log::info!("{merged} office hours blocks added");
    }

    let renderer = CalendarRenderer::new(args.template_sheet, GridLayout::default());
    calendar::render_all(&mut book, &renderer, &groups)?;

    let path = workbook::save(&book, &args.output_dir, Local::now().date_naive())?;
    println!("Workbook built and exported => {}", path.display());

    Ok(())
}
