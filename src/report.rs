//! Analysis report: text rendering and JSON output.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use ergo_graph::{ClassKind, Graph, HasseDiagram, class_period};
use ergo_matrix::{ClassStationary, StationaryOutcome};

/// Row sums further than this from 1 are flagged.
const ROW_SUM_TOLERANCE: f64 = 0.01;

/// Everything `ergo analyze` found out about a chain.
#[derive(Debug, Serialize)]
pub struct Report {
    pub n_states: usize,
    pub n_edges: usize,
    pub irreducible: bool,
    pub absorbing_states: Vec<usize>,
    pub classes: Vec<ClassReport>,
    pub links: Vec<LinkReport>,
    /// States whose outgoing weights do not sum to 1.
    pub non_stochastic_rows: Vec<RowSum>,
    pub distribution: Option<DistributionReport>,
}

#[derive(Debug, Serialize)]
pub struct ClassReport {
    pub name: String,
    pub members: Vec<usize>,
    pub kind: String,
    pub period: usize,
    pub stationary: StationaryReport,
}

#[derive(Debug, Serialize)]
pub struct StationaryReport {
    /// `transient`, `converged` or `not_converged`.
    pub status: &'static str,
    pub steps: Option<usize>,
    /// One value per class member.
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct LinkReport {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct RowSum {
    pub state: usize,
    pub sum: f64,
}

#[derive(Debug, Serialize)]
pub struct DistributionReport {
    pub start: usize,
    pub steps: u32,
    pub values: Vec<f64>,
}

impl Report {
    /// Assembles the report from the analysis results.
    pub fn new(
        graph: &Graph,
        hasse: &HasseDiagram<'_>,
        stationary: &[ClassStationary],
        distribution: Option<DistributionReport>,
    ) -> Result<Self> {
        let partition = hasse.partition();
        let kinds = hasse.class_kinds();

        let mut classes = Vec::with_capacity(partition.len());
        for (class, result) in partition.iter().zip(stationary) {
            let period = class_period(graph, hasse, class.id())
                .with_context(|| format!("failed to compute period of {}", class.name()))?;
            classes.push(ClassReport {
                name: class.name(),
                members: class.members().to_vec(),
                kind: kinds[class.id()].to_string(),
                period,
                stationary: StationaryReport::from(&result.outcome),
            });
        }

        let class_name = |id: usize| format!("C{}", id + 1);
        let links = hasse
            .links()
            .iter()
            .map(|l| LinkReport {
                from: class_name(l.src),
                to: class_name(l.dst),
            })
            .collect();

        let mut non_stochastic_rows = Vec::new();
        for state in 1..=graph.size() {
            let sum = graph.out_weight(state)?;
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                non_stochastic_rows.push(RowSum { state, sum });
            }
        }

        Ok(Self {
            n_states: graph.size(),
            n_edges: graph.edge_count(),
            irreducible: hasse.is_irreducible(),
            absorbing_states: hasse.absorbing_states(),
            classes,
            links,
            non_stochastic_rows,
            distribution,
        })
    }

    /// Number of persistent classes whose iteration did not settle.
    pub fn n_unsettled(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| c.stationary.status == "not_converged")
            .count()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))
    }
}

impl From<&StationaryOutcome> for StationaryReport {
    fn from(outcome: &StationaryOutcome) -> Self {
        let (status, steps) = match outcome {
            StationaryOutcome::Transient { .. } => ("transient", None),
            StationaryOutcome::Converged { steps, .. } => ("converged", Some(*steps)),
            StationaryOutcome::NotConverged { steps, .. } => ("not_converged", Some(*steps)),
        };
        Self {
            status,
            steps,
            values: outcome.values().to_vec(),
        }
    }
}

fn join_states(states: &[usize]) -> String {
    states
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn write_values(
    f: &mut fmt::Formatter<'_>,
    states: impl Iterator<Item = usize>,
    values: &[f64],
) -> fmt::Result {
    for (state, v) in states.zip(values) {
        write!(f, " {state}={v:.4}")?;
    }
    writeln!(f)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States: {} ({} edges)", self.n_states, self.n_edges)?;
        writeln!(
            f,
            "Irreducible: {}",
            if self.irreducible { "yes" } else { "no" }
        )?;
        for row in &self.non_stochastic_rows {
            writeln!(
                f,
                "Warning: outgoing weights of state {} sum to {:.5}",
                row.state, row.sum
            )?;
        }

        writeln!(f, "\nClasses:")?;
        for class in &self.classes {
            write!(
                f,
                "  {} {{{}}} {}, period {}",
                class.name,
                join_states(&class.members),
                class.kind,
                class.period
            )?;
            let persistent = class.kind == ClassKind::Persistent.to_string();
            if persistent && class.members.len() == 1 {
                write!(f, ", absorbing")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nHasse links:")?;
        if self.links.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for link in &self.links {
            writeln!(f, "  {} -> {}", link.from, link.to)?;
        }

        if self.absorbing_states.is_empty() {
            writeln!(f, "\nAbsorbing states: none")?;
        } else {
            writeln!(
                f,
                "\nAbsorbing states: {}",
                join_states(&self.absorbing_states)
            )?;
        }

        writeln!(f, "\nStationary distributions:")?;
        for class in &self.classes {
            let s = &class.stationary;
            match (s.status, s.steps) {
                ("converged", Some(steps)) => {
                    write!(f, "  {} (after {steps} steps):", class.name)?;
                    write_values(f, class.members.iter().copied(), &s.values)?;
                }
                ("not_converged", Some(steps)) => writeln!(
                    f,
                    "  {}: did not converge in {steps} steps (period {})",
                    class.name, class.period
                )?,
                _ => writeln!(f, "  {}: transient", class.name)?,
            }
        }

        if let Some(d) = &self.distribution {
            write!(
                f,
                "\nDistribution after {} steps from state {}:",
                d.steps, d.start
            )?;
            write_values(f, 1..=d.values.len(), &d.values)?;
        }
        Ok(())
    }
}
