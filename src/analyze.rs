//! Analyze command: classify a chain and compute its long-run behaviour.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use ergo_graph::{HasseDiagram, strongly_connected_components};
use ergo_io::{read_graph, write_graph_mermaid, write_hasse_mermaid};
use ergo_matrix::{Matrix, distribution_after, stationary_distributions};

use crate::cli::AnalyzeArgs;
use crate::config::ErgoConfig;
use crate::convert;
use crate::report::{DistributionReport, Report};

/// Run the analysis pipeline.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();

    // 1. Configuration, CLI flags win over the file
    let config = ErgoConfig::load(args.config.as_deref())?;
    let conv_cfg =
        convert::build_convergence_config(&config.convergence, args.epsilon, args.max_iter)?;
    let graph_mermaid = args.graph_mermaid.or(config.output.graph_mermaid);
    let hasse_mermaid = args.hasse_mermaid.or(config.output.hasse_mermaid);
    let json = args.json.or(config.output.json);

    // 2. Graph
    info!(path = %args.graph.display(), "reading graph");
    let graph = read_graph(&args.graph)
        .with_context(|| format!("failed to read graph: {}", args.graph.display()))?;
    info!(
        n_states = graph.size(),
        n_edges = graph.edge_count(),
        "graph loaded"
    );

    // 3. Classes and Hasse diagram
    let partition = strongly_connected_components(&graph);
    let hasse = HasseDiagram::build(&graph, &partition).context("failed to build hasse diagram")?;
    info!(
        n_classes = partition.len(),
        n_links = hasse.links().len(),
        "classes found"
    );

    // 4. Long-run behaviour
    let matrix = Matrix::from_graph(&graph).context("failed to build transition matrix")?;
    let stationary = stationary_distributions(&hasse, &matrix, &conv_cfg)
        .context("failed to compute stationary distributions")?;

    let distribution = match args.steps {
        Some(steps) => {
            let start = convert::resolve_start(args.start, graph.size())?;
            let initial = Matrix::unit_row(graph.size(), start)?;
            let after = distribution_after(&matrix, &initial, steps)
                .context("failed to compute distribution")?;
            Some(DistributionReport {
                start,
                steps,
                values: after.as_slice().to_vec(),
            })
        }
        None => None,
    };

    // 5. Report
    let report = Report::new(&graph, &hasse, &stationary, distribution)?;
    for row in &report.non_stochastic_rows {
        warn!(state = row.state, sum = row.sum, "outgoing weights do not sum to 1");
    }
    if report.n_unsettled() > 0 {
        warn!(
            n_classes = report.n_unsettled(),
            max_iter = conv_cfg.max_iter(),
            "some persistent classes did not converge"
        );
    }
    print!("{report}");

    // 6. Optional outputs
    if let Some(path) = &graph_mermaid {
        write_graph_mermaid(&graph, path)
            .with_context(|| format!("failed to write graph flowchart: {}", path.display()))?;
    }
    if let Some(path) = &hasse_mermaid {
        write_hasse_mermaid(&hasse, path)
            .with_context(|| format!("failed to write hasse flowchart: {}", path.display()))?;
    }
    if let Some(path) = &json {
        report.write_json(path)?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
