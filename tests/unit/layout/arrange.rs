use super::*;
use crate::pixel::policy::PixelConfig;
use crate::scene::style::Align;
use crate::text::cache::TextCache;
use crate::text::monospace::MonospaceOracle;

fn sized(tree: &mut SceneTree, w: f64, h: f64) -> NodeId {
    let id = tree.create_box();
    tree.edit(id).frame(w, h);
    id
}

fn run(tree: &mut SceneTree, root: NodeId, w: f64, h: f64) -> crate::layout::PassStats {
    let mut cache = TextCache::new();
    let mut oracle = MonospaceOracle::default();
    let mut ctx = PassCtx::new(PixelConfig::default(), &mut cache, &mut oracle);
    tree.measure(root, &mut ctx);
    tree.layout(root, 0.0, 0.0, w, h, &mut ctx);
    ctx.stats
}

fn origin(tree: &SceneTree, id: NodeId) -> (f64, f64) {
    let r = tree.node(id).unwrap().rect();
    (r.x0, r.y0)
}

fn size(tree: &SceneTree, id: NodeId) -> (f64, f64) {
    let r = tree.node(id).unwrap().rect();
    (r.width(), r.height())
}

fn row(tree: &mut SceneTree, width: f64, justify: Justify, widths: &[f64]) -> (NodeId, Vec<NodeId>) {
    let kids: Vec<NodeId> = widths.iter().map(|w| sized(tree, *w, 20.0)).collect();
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::Horizontal)
        .justify(justify)
        .frame(width, 20.0)
        .children(&kids);
    (root, kids)
}

#[test]
fn space_between_scenario_places_children_at_10_and_195() {
    let mut tree = SceneTree::new();
    let a = sized(&mut tree, 100.0, 50.0);
    let b = sized(&mut tree, 100.0, 50.0);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::Horizontal)
        .frame(300.0, 70.0)
        .padding(10.0)
        .spacing(5.0)
        .justify(Justify::SpaceBetween)
        .children(&[a, b]);

    run(&mut tree, root, 800.0, 600.0);
    assert_eq!(origin(&tree, a), (10.0, 10.0));
    assert_eq!(origin(&tree, b), (195.0, 10.0));
}

#[test]
fn zstack_scenario_aligns_end_and_center() {
    let mut tree = SceneTree::new();
    let child = sized(&mut tree, 50.0, 50.0);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::ZStack)
        .frame(220.0, 220.0)
        .padding(10.0)
        .alignment(Align::End, Align::Center)
        .children(&[child]);

    run(&mut tree, root, 800.0, 600.0);
    assert_eq!(origin(&tree, child), (160.0, 85.0));
    assert_eq!(size(&tree, child), (50.0, 50.0));
}

#[test]
fn space_between_gaps_are_equal_and_sum_to_free_space() {
    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 300.0, Justify::SpaceBetween, &[30.0, 30.0, 30.0, 30.0]);
    run(&mut tree, root, 300.0, 20.0);

    let xs: Vec<f64> = kids.iter().map(|k| origin(&tree, *k).0).collect();
    assert_eq!(xs, vec![0.0, 90.0, 180.0, 270.0]);
    let gaps: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0] - 30.0).collect();
    assert!(gaps.iter().all(|g| *g == gaps[0]));
    assert_eq!(gaps.iter().sum::<f64>(), 300.0 - 120.0);
}

#[test]
fn single_child_space_between_behaves_as_start() {
    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 300.0, Justify::SpaceBetween, &[30.0]);
    run(&mut tree, root, 300.0, 20.0);
    assert_eq!(origin(&tree, kids[0]).0, 0.0);
}

#[test]
fn space_around_puts_half_a_gap_first() {
    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 300.0, Justify::SpaceAround, &[100.0, 100.0]);
    run(&mut tree, root, 300.0, 20.0);
    assert_eq!(origin(&tree, kids[0]).0, 25.0);
    assert_eq!(origin(&tree, kids[1]).0, 175.0);
}

#[test]
fn space_evenly_includes_the_outer_gaps() {
    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 250.0, Justify::SpaceEvenly, &[50.0, 50.0, 50.0]);
    run(&mut tree, root, 250.0, 20.0);
    let xs: Vec<f64> = kids.iter().map(|k| origin(&tree, *k).0).collect();
    assert_eq!(xs, vec![25.0, 100.0, 175.0]);
}

#[test]
fn end_and_center_account_for_spacing() {
    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 300.0, Justify::End, &[100.0, 100.0]);
    tree.edit(root).spacing(5.0);
    run(&mut tree, root, 300.0, 20.0);
    assert_eq!(origin(&tree, kids[0]).0, 95.0);
    assert_eq!(origin(&tree, kids[1]).0, 200.0);

    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 300.0, Justify::Center, &[100.0, 100.0]);
    tree.edit(root).spacing(5.0);
    for k in &kids {
        tree.edit(*k).pixel_snap(false);
    }
    run(&mut tree, root, 300.0, 20.0);
    assert_eq!(origin(&tree, kids[0]).0, 47.5);
    assert_eq!(origin(&tree, kids[1]).0, 152.5);
}

#[test]
fn overflowing_children_never_get_negative_space_gaps() {
    let mut tree = SceneTree::new();
    let (root, kids) = row(&mut tree, 100.0, Justify::SpaceBetween, &[80.0, 80.0]);
    run(&mut tree, root, 100.0, 20.0);
    assert_eq!(origin(&tree, kids[1]).0, 80.0);
}

#[test]
fn plan_handles_degenerate_counts() {
    assert_eq!(
        plan_main_axis(Justify::SpaceAround, 50.0, 0.0, 0),
        MainAxisPlan { lead: 0.0, extra: 0.0 }
    );
    assert_eq!(
        plan_main_axis(Justify::SpaceEvenly, -10.0, 0.0, 2),
        MainAxisPlan { lead: 0.0, extra: 0.0 }
    );
}

#[test]
fn vertical_cross_axis_alignment() {
    let mut tree = SceneTree::new();
    let child = sized(&mut tree, 40.0, 10.0);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::Vertical)
        .align(Align::Center)
        .frame(100.0, 50.0)
        .children(&[child]);
    run(&mut tree, root, 100.0, 50.0);
    assert_eq!(origin(&tree, child), (30.0, 0.0));
}

#[test]
fn stretch_is_placed_like_start() {
    let mut tree = SceneTree::new();
    let child = sized(&mut tree, 40.0, 10.0);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::Vertical)
        .align(Align::Stretch)
        .frame(100.0, 50.0)
        .children(&[child]);
    run(&mut tree, root, 100.0, 50.0);
    assert_eq!(origin(&tree, child), (0.0, 0.0));
    assert_eq!(size(&tree, child), (40.0, 10.0));
}

#[test]
fn vertical_flow_advances_by_height_and_spacing() {
    let mut tree = SceneTree::new();
    let a = sized(&mut tree, 10.0, 10.0);
    let b = sized(&mut tree, 10.0, 20.0);
    let c = sized(&mut tree, 10.0, 5.0);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::Vertical)
        .spacing(3.0)
        .padding(2.0)
        .children(&[a, b, c]);
    run(&mut tree, root, 500.0, 500.0);
    assert_eq!(origin(&tree, a), (2.0, 2.0));
    assert_eq!(origin(&tree, b), (2.0, 15.0));
    assert_eq!(origin(&tree, c), (2.0, 38.0));
    assert_eq!(size(&tree, root), (14.0, 45.0));
}

#[test]
fn resolved_size_never_exceeds_the_offer() {
    let mut tree = SceneTree::new();
    let child = sized(&mut tree, 500.0, 500.0);
    let root = tree.create_box();
    tree.edit(root).children(&[child]);
    run(&mut tree, root, 200.0, 100.0);
    assert_eq!(size(&tree, root), (200.0, 100.0));
    assert_eq!(size(&tree, child), (200.0, 100.0));
}

#[test]
fn max_extent_caps_and_unbounded_fills() {
    let mut tree = SceneTree::new();
    let capped = sized(&mut tree, 150.0, 10.0);
    tree.edit(capped).max_size(MaxExtent::Px(60.0), MaxExtent::Auto);
    let filler = tree.create_box();
    tree.edit(filler).max_size(MaxExtent::Unbounded, MaxExtent::Unbounded);
    let root = tree.create_box();
    tree.edit(root).children(&[capped, filler]);

    run(&mut tree, root, 200.0, 100.0);
    assert_eq!(size(&tree, capped), (60.0, 10.0));
    assert_eq!(size(&tree, filler), size(&tree, root));
}

#[test]
fn text_is_positioned_at_its_intrinsic_size() {
    let mut tree = SceneTree::new();
    let t = tree.create_text("hello");
    tree.edit(t).font(10.0, None);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::Vertical)
        .padding(4.0)
        .frame(300.0, 100.0)
        .children(&[t]);
    run(&mut tree, root, 300.0, 100.0);
    assert_eq!(origin(&tree, t), (4.0, 4.0));
    assert_eq!(size(&tree, t), (38.0, 20.0));
}

#[test]
fn unchanged_offers_skip_recompute_but_revisit_children() {
    let mut tree = SceneTree::new();
    let leaf = sized(&mut tree, 10.0, 10.0);
    let mid = tree.create_box();
    tree.edit(mid).children(&[leaf]);
    let root = tree.create_box();
    tree.edit(root).padding(5.0).children(&[mid]);

    let first = run(&mut tree, root, 100.0, 100.0);
    assert_eq!(first.laid_out, 3);

    let again = run(&mut tree, root, 100.0, 100.0);
    assert_eq!(again.laid_out, 0);

    tree.node_mut(leaf).unwrap().dirty.insert(Dirty::LAYOUT);
    let revisit = run(&mut tree, root, 100.0, 100.0);
    assert_eq!(revisit.laid_out, 1);
    assert!(!tree.node(leaf).unwrap().dirty().contains(Dirty::LAYOUT));
}

#[test]
fn changed_offer_recomputes_clean_nodes() {
    let mut tree = SceneTree::new();
    let filler = tree.create_box();
    tree.edit(filler).max_size(MaxExtent::Unbounded, MaxExtent::Unbounded);
    run(&mut tree, filler, 100.0, 100.0);
    let stats = run(&mut tree, filler, 120.0, 80.0);
    assert_eq!(stats.laid_out, 1);
    assert_eq!(size(&tree, filler), (120.0, 80.0));
}

#[test]
fn snapped_rects_land_on_the_device_grid() {
    let mut tree = SceneTree::new();
    let child = sized(&mut tree, 33.3, 10.0);
    let root = tree.create_box();
    tree.edit(root)
        .direction(LayoutMode::ZStack)
        .alignment(Align::Center, Align::Start)
        .frame(100.0, 10.0)
        .children(&[child]);
    run(&mut tree, root, 100.0, 10.0);
    let r = tree.node(child).unwrap().rect();
    let cfg = PixelConfig::default();
    assert!(cfg.is_pixel_aligned(r.x0));
    assert!(cfg.is_pixel_aligned(r.x1));
}
