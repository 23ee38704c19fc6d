//! Turns a completed route into a plain text set of directions, suitable for
//! sending to the user by text message
use aho_corasick::AhoCorasick;

use crate::common::campus_graph::CampusGraph;
use crate::common::error::{Error, Result};
use crate::common::graph_data::{LocationId, PathType};
use crate::routing::metrics::{format_time, route_segments};

/// A single leg of a route, from one location to the next
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionStep {
    pub from_name: String,
    pub to_name: String,
    pub path_type: PathType,
}

/// Everything which is needed to describe a route in words
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    pub start_name: String,
    pub end_name: String,
    pub steps: Vec<DirectionStep>,
    pub total_time: f64,
}

fn location_name(campus: &CampusGraph, id: LocationId) -> Result<String> {
    campus
        .location(id)
        .map(|location| location.name.clone())
        .ok_or(Error::UnknownLocation { id })
}

impl Directions {
    /// Describe the provided route. Every location on the route must be
    /// known to the graph
    pub fn new(campus: &CampusGraph, route: &[LocationId]) -> Result<Self> {
        let (start, end) = match (route.first(), route.last()) {
            (Some(start), Some(end)) => (*start, *end),
            _ => return Err(Error::EmptyRoute),
        };

        let mut steps = Vec::<DirectionStep>::new();
        for segment in route_segments(campus, route) {
            steps.push(DirectionStep {
                from_name: location_name(campus, segment.src)?,
                to_name: location_name(campus, segment.dst)?,
                path_type: segment.path_type,
            });
        }

        Ok(Directions {
            start_name: location_name(campus, start)?,
            end_name: location_name(campus, end)?,
            steps,
            total_time: campus.calculate_path_time(route),
        })
    }

    /// Numbered list of steps, one per line
    fn format_steps(&self) -> String {
        self.steps
            .iter()
            .enumerate()
            .map(|(inx, step)| {
                format!(
                    "{}. {} to {} via {}\n",
                    inx + 1,
                    step.from_name,
                    step.to_name,
                    step.path_type
                )
            })
            .collect()
    }

    /// Render the directions into the text message template
    pub fn render(&self) -> Result<String> {
        // This brings the template into the compiled code
        let template = include_str!("directions.txt");

        let patterns = [
            "< start_name >",
            "< end_name >",
            "< steps >",
            "< estimated_time >",
        ];
        let replace_with = [
            self.start_name.clone(),
            self.end_name.clone(),
            self.format_steps(),
            format_time(self.total_time),
        ];

        let ac = AhoCorasick::new(patterns)?;

        Ok(ac.replace_all(template, &replace_with))
    }
}
