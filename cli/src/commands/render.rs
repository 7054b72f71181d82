//! The `render` command: render a template file against flag-bound values.

use std::io::Write;

use blacksquid::{Arena, RenderOptions, RenderOptionsOverride, Template};

use crate::cli::RenderArgs;
use crate::common::input::read_input;
use crate::common::vars::build_map;
use crate::common::{CliError, CliResult};

/// Run the render command.
pub fn run(args: RenderArgs) -> CliResult<()> {
    let (content, name) = read_input(&args.file)?;

    let arena = match args.region_capacity {
        Some(words) => Arena::with_region_capacity(words),
        None => Arena::new(),
    };
    let values = build_map(&arena, &args.vars)?;

    let mut options = RenderOptions::default();
    options.override_with(&RenderOptionsOverride {
        missing_key: Some(args.missing.into()),
        max_depth: args.max_depth,
    });

    let template_error = |error| CliError::Template {
        error,
        source_text: content.clone(),
        name: name.clone(),
    };
    let template = Template::parse(&content).map_err(template_error)?;
    let out = template
        .render(&arena, values, &options)
        .map_err(template_error)?;
    tracing::debug!(
        bytes = out.len(),
        regions = arena.region_count(),
        allocated = arena.allocated_bytes(),
        "rendered template"
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
