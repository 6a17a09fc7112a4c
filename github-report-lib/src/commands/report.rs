use super::common::init_logging;
use super::config::Config;
use super::{Host, LOG_TARGET, ReportArgs};
use crate::Result;
use crate::facts::{Client, GitHubSource, GitLfs, RecordSource, RepoQuery, enrich};
use crate::fields::{
    Diagnostics, Field, FieldSelection, Humanizer, LogDiagnostics, OutputFormat, Projection, Projector, Record, SortSpec, Totals,
    has_multiple_owners, select_fields,
};
use crate::reports::{self, Report};
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;
use std::io::{self, Write};

/// How the fetched records become a report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub fields: Option<Vec<Field>>,
    pub humanizer: Option<Humanizer>,
    pub totals: bool,
    pub enrichment: bool,
}

/// Fetch the requested repositories and write the report to the host's output.
pub async fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.verbose, args.quiet, args.log.as_deref())?;

    let config = Config::load(Utf8Path::new("."), args.config.as_deref())?;
    let query = RepoQuery::new(args.user.as_deref(), args.organization.as_deref(), args.repo.as_deref())?;
    let sort = match &args.sort {
        Some(sort) => sort.clone(),
        None => config.sort_spec()?,
    };

    let humanizer = if args.humanize {
        Some(Humanizer::new(config.thousands_separator, &config.datetime_format)?)
    } else {
        None
    };

    let options = ReportOptions {
        format: args.output_format(),
        fields: args.explicit_fields(),
        humanizer,
        totals: args.totals,
        enrichment: args.lfs,
    };

    let token_file = args.token_file.as_deref().unwrap_or(&config.token_file);
    let token = match &args.token {
        Some(token) => Some(token.clone()),
        None => read_token_file(token_file)?,
    };

    let api_url = args.api_url.as_ref().unwrap_or(&config.api_url);
    let source = GitHubSource::new(Client::new(token.as_deref(), api_url)?);
    let mut records = source.fetch(&query).await?;
    log::info!(target: LOG_TARGET, "Found {} repositories", records.len());

    if args.lfs {
        let failures = enrich(&mut records, &GitLfs::new(config.git_timeout)).await;
        if failures > 0 {
            let _ = writeln!(host.error(), "Unable to measure LFS usage of {failures} repositories");
        }
    }

    let report = build_report(records, &sort, &options, &mut LogDiagnostics);

    let mut output = String::new();
    reports::generate(&report, options.format, args.color.use_colors(), &mut output)?;
    write!(host.output(), "{output}").into_app_err("writing the report")?;

    Ok(())
}

/// Read a token from `path`, which need not exist.
fn read_token_file(path: &Utf8Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            log::debug!(target: LOG_TARGET, "Reading token from '{path}'");
            let token = text.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).into_app_err_with(|| format!("reading token file '{path}'")),
    }
}

/// Sort, select, project, and total the records.
pub fn build_report(mut records: Vec<Record>, sort: &SortSpec, options: &ReportOptions, diagnostics: &mut dyn Diagnostics) -> Report {
    sort.sort(&mut records);

    let multi_owner = has_multiple_owners(&records);
    let mut selection = select_fields(options.fields.clone(), options.format, multi_owner, options.enrichment, diagnostics);
    let id_field = selection.ensure_id_field(multi_owner);

    let projector = Projector::new(options.format, options.humanizer.clone());
    let mut totals = options.totals.then(Totals::default);

    let mut rows: Vec<Projection> = records
        .iter()
        .map(|record| projector.project(record, &selection, totals.as_mut()))
        .collect();

    if let Some(totals) = totals {
        match selection.fields() {
            Some(fields) => rows.push(totals.into_projection(fields, id_field, &projector)),
            None => diagnostics.warn("no totals row is produced when every field is reported; choose fields with --fields"),
        }
    }

    Report::new(rows, columns(&selection), id_field)
}

fn columns(selection: &FieldSelection) -> Option<Vec<String>> {
    let fields = selection.fields()?;
    let mut columns: Vec<String> = Vec::with_capacity(fields.len());
    for field in fields {
        if !columns.iter().any(|column| column == field.name()) {
            columns.push(field.name().to_string());
        }
    }
    Some(columns)
}
