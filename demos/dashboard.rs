//! Builds a small dashboard, then animates a progress bar for a few frames to show that only the
//! touched nodes are repainted.

use strata::{
    MaxExtent, MonospaceOracle, RecordingBackend, Renderer, RendererSettings, Rgba, Viewport,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let settings = RendererSettings {
        viewport: Viewport::new(640.0, 360.0),
        ..RendererSettings::default()
    };
    let mut renderer = Renderer::new(settings, Box::new(MonospaceOracle::default()));
    let tree = renderer.tree_mut();

    let title = tree.create_text("Build status");
    tree.edit(title).font(20.0, None).font_weight(700);

    let track = tree.create_box();
    let bar = tree.create_box();
    tree.edit(bar)
        .frame(0.0, 12.0)
        .background(Rgba::from_rgb8_alpha(40, 160, 90, 1.0))
        .corner_radius(6.0);
    tree.edit(track)
        .frame(400.0, 12.0)
        .background(Rgba::from_rgb8_alpha(220, 220, 220, 1.0))
        .corner_radius(6.0)
        .children(&[bar]);

    let caption = tree.create_text("0%");
    tree.edit(caption)
        .font(12.0, None)
        .max_size(MaxExtent::px(80.0), MaxExtent::Auto);

    let row = tree.create_box();
    tree.edit(row)
        .direction("horizontal")
        .spacing(12.0)
        .align("center")
        .children(&[track, caption]);

    let root = tree.create_box();
    tree.edit(root)
        .direction("vertical")
        .padding(24.0)
        .spacing(16.0)
        .background(Rgba::WHITE)
        .children(&[title, row]);
    tree.set_root(root);

    let mut backend = RecordingBackend::new();
    for pct in (0..=100).step_by(25) {
        let width = 400.0 * f64::from(pct) / 100.0;
        renderer.tree_mut().edit(bar).frame(width, 12.0);
        renderer.tree_mut().edit(caption).content(format!("{pct}%"));
        if let Some(stats) = renderer.frame(&mut backend)? {
            println!(
                "frame {}: measured={} painted={} oracle_calls={}",
                stats.frame, stats.measured, stats.painted, stats.oracle_calls
            );
        }
    }

    renderer.resize(800.0, 480.0);
    let stats = renderer.frame(&mut backend)?;
    println!("after resize: {stats:?}");
    Ok(())
}
