use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use strata::{
    FrameStats, MonospaceOracle, NodeId, ParleyTextOracle, PixelConfig, PixelPolicy,
    RecordingBackend, Renderer, RendererSettings, SceneDesc, TextOracle, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "strata", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one frame and print every node's resolved rect as JSON.
    Layout(SceneArgs),
    /// Run one frame and print draw counts and frame stats as JSON.
    Paint(SceneArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Snapping policy: subpixel, integer or half-pixel.
    #[arg(long, default_value = "integer")]
    policy: PixelPolicy,

    /// Font file for text shaping. Without it a fixed-advance metric is used.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct NodeReport {
    id: String,
    kind: &'static str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    degraded: bool,
}

#[derive(serde::Serialize)]
struct LayoutReport {
    viewport: Viewport,
    nodes: Vec<NodeReport>,
}

#[derive(serde::Serialize)]
struct PaintReport {
    viewport: Viewport,
    rect_floats: usize,
    textures: Vec<u64>,
    stats: FrameStats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Paint(args) => cmd_paint(args),
    }
}

fn load(args: &SceneArgs) -> anyhow::Result<(Renderer, HashMap<NodeId, String>)> {
    let desc = SceneDesc::from_path(&args.in_path)?;
    desc.validate()
        .with_context(|| format!("validate scene '{}'", args.in_path.display()))?;

    let oracle: Box<dyn TextOracle> = match &args.font {
        Some(path) => Box::new(ParleyTextOracle::from_font_file(path)?),
        None => Box::new(MonospaceOracle::default()),
    };
    let settings = RendererSettings {
        viewport: Viewport::new(args.width, args.height),
        pixel: PixelConfig::new(args.policy, args.dpr),
        ..RendererSettings::default()
    };
    let mut renderer = Renderer::new(settings, oracle);
    let built = desc.build_named(renderer.tree_mut());
    renderer.tree_mut().set_root(built.root);

    let names = built.names.into_iter().map(|(k, v)| (v, k)).collect();
    Ok((renderer, names))
}

fn run_frame(renderer: &mut Renderer) -> anyhow::Result<(FrameStats, RecordingBackend)> {
    let mut backend = RecordingBackend::new();
    let stats = renderer
        .frame(&mut backend)?
        .context("renderer produced no frame")?;
    Ok((stats, backend))
}

fn cmd_layout(args: SceneArgs) -> anyhow::Result<()> {
    let (mut renderer, names) = load(&args)?;
    run_frame(&mut renderer)?;

    let tree = renderer.tree();
    let order = tree.root().map(|r| tree.preorder(r)).unwrap_or_default();
    let nodes = order
        .into_iter()
        .filter_map(|id| {
            let node = tree.node(id)?;
            let rect = node.rect();
            Some(NodeReport {
                id: names.get(&id).cloned().unwrap_or_else(|| id.to_string()),
                kind: if node.is_text() { "text" } else { "box" },
                x: rect.x0,
                y: rect.y0,
                width: rect.width(),
                height: rect.height(),
                degraded: tree.is_degraded(id),
            })
        })
        .collect();

    let report = LayoutReport {
        viewport: renderer.settings().viewport,
        nodes,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_paint(args: SceneArgs) -> anyhow::Result<()> {
    let (mut renderer, _) = load(&args)?;
    let (stats, backend) = run_frame(&mut renderer)?;
    let frame = backend
        .last_frame()
        .context("backend recorded no frame")?;

    let report = PaintReport {
        viewport: renderer.settings().viewport,
        rect_floats: frame.rect_vertices.len(),
        textures: frame.text_draws.iter().map(|(t, _)| t.0).collect(),
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
