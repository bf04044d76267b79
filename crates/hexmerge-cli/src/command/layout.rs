use hexmerge_engine::{HexLayout, Pos, SessionConfig};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LayoutArg {
    /// Hexagon radius
    #[arg(long, default_value_t = SessionConfig::DEFAULT_RADIUS)]
    radius: usize,
}

/// Cell mask of the backing grid, `1` for board cells and `0` for masked ones.
fn render_mask(layout: &HexLayout) -> String {
    let dim = layout.dim();
    let mut out = String::new();
    for row in 0..dim {
        let cells = (0..dim)
            .map(|col| if layout.contains(Pos::new(row, col)) { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&cells);
        out.push('\n');
    }
    out
}

fn render_spans(layout: &HexLayout) -> String {
    layout
        .row_spans()
        .map(|span| {
            format!(
                "row {}: columns {}..{} ({} cells, trim {} left / {} right)\n",
                span.row,
                span.start,
                span.end,
                span.cell_count(),
                span.left_trim,
                span.right_trim,
            )
        })
        .collect()
}

pub(crate) fn run(arg: &LayoutArg) -> anyhow::Result<()> {
    let LayoutArg { radius } = arg;
    let layout = HexLayout::new(*radius)?;

    println!("radius {radius}: {0}x{0} grid, {1} cells", layout.dim(), layout.cell_count());
    println!();
    print!("{}", render_mask(&layout));
    println!();
    print!("{}", render_spans(&layout));
    Ok(())
}
