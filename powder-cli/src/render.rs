//! Plain-text rendering of rankings and resort details.

use std::io::{self, Write};

use powder_core::{ResortAttribute, ResortNode};

/// Write a numbered ranking, best first.
pub(crate) fn write_ranking(writer: &mut dyn Write, ranked: &[&ResortNode]) -> io::Result<()> {
    if ranked.is_empty() {
        return writeln!(
            writer,
            "No resort scored above zero. Try other priorities or a larger distance."
        );
    }
    writeln!(writer, "Top {} resorts:", ranked.len())?;
    for (position, node) in ranked.iter().enumerate() {
        writeln!(
            writer,
            "{}. {} - Score: {:.2}",
            position + 1,
            node.name,
            node.score()
        )?;
    }
    Ok(())
}

/// Write everything known about one resort.
pub(crate) fn write_details(writer: &mut dyn Write, node: &ResortNode) -> io::Result<()> {
    writeln!(writer, "{}", node.name)?;
    if let Some(continent) = node.continent {
        writeln!(writer, "  Continent: {}", continent.title())?;
    }
    match (&node.country, &node.state_province) {
        (Some(country), Some(region)) => writeln!(writer, "  Country: {country} ({region})")?,
        (Some(country), None) => writeln!(writer, "  Country: {country}")?,
        (None, Some(region)) => writeln!(writer, "  Region: {region}")?,
        (None, None) => {}
    }
    if !node.url.is_empty() {
        writeln!(writer, "  Website: {}", node.url)?;
    }
    if let (Some(latitude), Some(longitude)) = (node.latitude(), node.longitude()) {
        writeln!(writer, "  Location: {latitude:.4}, {longitude:.4}")?;
    }
    if let Some(stars) = node.stars {
        writeln!(writer, "  Stars: {stars}")?;
    }
    for attribute in ResortAttribute::ALL {
        if let Some(value) = node.attribute(attribute) {
            writeln!(writer, "  {}: {value:.2}", attribute.label())?;
        }
    }
    match (node.current_snow_depth, node.normalized_snow_depth) {
        (Some(depth), Some(normalised)) => {
            writeln!(writer, "  Snow depth: {depth} (normalised {normalised:.2})")?;
        }
        (Some(depth), None) => writeln!(writer, "  Snow depth: {depth}")?,
        (None, _) => writeln!(writer, "  Snow depth: no data")?,
    }
    writeln!(writer, "  Score: {:.2}", node.score())
}
