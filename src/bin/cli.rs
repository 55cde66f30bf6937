use clap::Parser;
use clap::error::ErrorKind;
use seminarplan::export::{render_text_table, schedule_table};
use seminarplan::logging::init_tracing;
use seminarplan::{
    ExportFormat, GermanHolidays, JsonSemesterStore, Locale, PlanRequest, SemesterStore, Settings,
    parse_time_of_day, plan_course, weekday_from_index, write_export,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "seminarplan", about = "Weekly course schedule for a semester", version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (TOML); defaults to ./seminarplan.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Semester identifier, e.g. "SoSe 2024"
    #[arg(short, long, required_unless_present = "list_semesters")]
    semester: Option<String>,

    /// Output file; the extension selects the format (md, csv, ics)
    #[arg(short, long, required_unless_present = "list_semesters")]
    output: Option<PathBuf>,

    /// Holiday region (DE or a federal-state code such as NW)
    #[arg(long)]
    region: Option<String>,

    /// Display language for table headers (de, en)
    #[arg(long)]
    locale: Option<Locale>,

    /// Semester dates JSON file
    #[arg(long)]
    semester_file: Option<PathBuf>,

    /// Course name used for the calendar summary
    #[arg(short = 'n', long, default_value = "")]
    name: String,

    /// Print the known semesters and exit
    #[arg(long)]
    list_semesters: bool,

    /// Day as number with Monday=0, Tuesday=1, ...
    #[arg(required_unless_present = "list_semesters")]
    day: Option<u8>,

    /// Format: HH:MM
    #[arg(required_unless_present = "list_semesters")]
    start_time: Option<String>,

    /// Format: HH:MM
    #[arg(required_unless_present = "list_semesters")]
    end_time: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: could not load settings: {e}");
            process::exit(1);
        }
    };
    if let Some(region) = &cli.region {
        settings.region = region.clone();
    }
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }
    if let Some(path) = &cli.semester_file {
        settings.semester_file = path.clone();
    }
    let level = if cli.verbose { "debug" } else { settings.log_level.as_str() };
    init_tracing(level);
    tracing::debug!(?settings, "settings loaded");

    let store = JsonSemesterStore::new(&settings.semester_file);

    if cli.list_semesters {
        match store.list_semesters() {
            Ok(semesters) => {
                for semester in semesters {
                    println!("{semester}");
                }
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }

    if let Err(message) = run(&cli, &settings, &store) {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn run(cli: &Cli, settings: &Settings, store: &JsonSemesterStore) -> Result<(), String> {
    let (Some(semester), Some(output), Some(day), Some(start), Some(end)) = (
        cli.semester.as_ref(),
        cli.output.as_ref(),
        cli.day,
        cli.start_time.as_deref(),
        cli.end_time.as_deref(),
    ) else {
        return Err("semester, output, day, start_time and end_time are required".into());
    };

    // Reject unknown formats before doing any work.
    ExportFormat::from_path(output).map_err(|e| e.to_string())?;

    let weekday = weekday_from_index(day).map_err(|e| e.to_string())?;
    let start_time =
        parse_time_of_day(start).ok_or_else(|| format!("invalid start time '{start}' (HH:MM)"))?;
    let end_time =
        parse_time_of_day(end).ok_or_else(|| format!("invalid end time '{end}' (HH:MM)"))?;

    let request = PlanRequest {
        semester: semester.clone(),
        weekday,
        start_time,
        end_time,
    };
    let plan = plan_course(store, &GermanHolidays, &settings.region, &request)
        .map_err(|e| e.to_string())?;

    let course_name = if cli.name.trim().is_empty() {
        semester.as_str()
    } else {
        cli.name.as_str()
    };
    let format = write_export(output, &plan, course_name, settings.locale).map_err(|e| e.to_string())?;

    let table = schedule_table(&plan.annotated).map_err(|e| e.to_string())?;
    println!("{}", render_text_table(&table, settings.locale));
    println!(
        "{} {}: {} sessions, {} excluded. Wrote {} ({}).",
        settings.locale.weekday_name(weekday),
        plan.semester,
        plan.normal_sessions(),
        plan.excluded().count(),
        output.display(),
        format.extension()
    );
    Ok(())
}
