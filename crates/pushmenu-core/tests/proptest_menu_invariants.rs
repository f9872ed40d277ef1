#![forbid(unsafe_code)]

//! Property tests for depth annotation and the level state machine.
//!
//! Chains go past nine levels on purpose: depths are integers, so level 10
//! must sort after level 2.

use proptest::prelude::*;
use pushmenu_core::depth::level_depth;
use pushmenu_core::testing::{MockDom, NodeId, simulate_click};
use pushmenu_core::transform::wrapper_translation;
use pushmenu_core::{DomHost, LevelMenu, MenuType, PushMenuConfig, Transform};

const LEVEL: &str = "ts-pushmenu-mp-level";
const BACK: &str = "ts-pushmenu-mp-back";
const OPEN: &str = "ts-pushmenu-mp-level-open";
const OVERLAY: &str = "ts-pushmenu-mp-level-overlay";

/// A straight chain of `depth` nested panels, each with a back control and
/// (except the last) a link opening the next one.
struct Chain {
    wrapper: NodeId,
    trigger: NodeId,
    root: NodeId,
    panels: Vec<NodeId>,
    links: Vec<NodeId>,
    backs: Vec<NodeId>,
}

fn chain(depth: usize, width: f64) -> (MockDom, Chain) {
    let mut dom = MockDom::new();
    let body = dom.element("body", None).build();
    let wrapper = dom.element("div", Some(body)).id("ts-pushmenu-mp-pusher").build();
    let root = dom.element("nav", Some(wrapper)).width(width).build();
    let trigger = dom.element("a", Some(wrapper)).build();

    let mut panels = Vec::new();
    let mut links = Vec::new();
    let mut backs = Vec::new();
    let mut parent = root;
    for d in 0..depth {
        let panel = dom.element("div", Some(parent)).class(LEVEL).build();
        backs.push(dom.element("a", Some(panel)).class(BACK).build());
        panels.push(panel);
        if d + 1 < depth {
            let ul = dom.element("ul", Some(panel)).build();
            let li = dom.element("li", Some(ul)).build();
            links.push(dom.element("a", Some(li)).build());
            parent = li;
        }
    }
    (
        dom,
        Chain {
            wrapper,
            trigger,
            root,
            panels,
            links,
            backs,
        },
    )
}

fn build(depth: usize, width: f64, spacing: f64, menu_type: MenuType) -> (LevelMenu<MockDom>, Chain) {
    let (dom, c) = chain(depth, width);
    let cfg = PushMenuConfig::new(c.root, c.trigger)
        .with_level_spacing(spacing)
        .with_menu_type(menu_type);
    (LevelMenu::build(dom, cfg).expect("chain menu builds"), c)
}

fn open_to(menu: &mut LevelMenu<MockDom>, c: &Chain, level: usize) {
    simulate_click(menu, c.trigger);
    for link in c.links.iter().take(level.saturating_sub(1)) {
        simulate_click(menu, *link);
    }
}

fn no_markers(menu: &LevelMenu<MockDom>, c: &Chain) -> bool {
    c.panels
        .iter()
        .all(|p| !menu.host().has_class(p, OPEN) && !menu.host().has_class(p, OVERLAY))
}

/// Random forest: node `i` hangs under an earlier node (or is detached), and
/// may carry the level class.
fn arb_tree() -> impl Strategy<Value = Vec<(Option<usize>, bool)>> {
    prop::collection::vec((any::<prop::sample::Index>(), any::<bool>(), 0u8..10), 1..40).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (idx, is_level, detach))| {
                    // Node 0 is the root; roughly one in ten nodes is detached.
                    let parent = if i == 0 || detach == 0 {
                        None
                    } else {
                        Some(idx.index(i))
                    };
                    (parent, is_level)
                })
                .collect()
        },
    )
}

fn expected_depth(tree: &[(Option<usize>, bool)], node: usize) -> u32 {
    let mut depth = 0;
    let mut current = node;
    loop {
        if current == 0 {
            return depth;
        }
        let (parent, is_level) = tree[current];
        if is_level {
            depth += 1;
        }
        match parent {
            Some(p) => current = p,
            None => return 0,
        }
    }
}

proptest! {
    #[test]
    fn depth_counts_level_ancestors(tree in arb_tree()) {
        let mut dom = MockDom::new();
        let mut ids = Vec::with_capacity(tree.len());
        for (parent, is_level) in &tree {
            let mut b = dom.element("div", parent.map(|p| ids[p]));
            if *is_level {
                b = b.class(LEVEL);
            }
            ids.push(b.build());
        }
        let root = ids[0];
        for (i, id) in ids.iter().enumerate() {
            let depth = level_depth(&dom, id, &root, LEVEL);
            prop_assert_eq!(depth, expected_depth(&tree, i));
            // Depth never decreases going down a branch.
            if let Some(p) = tree[i].0 {
                prop_assert!(depth >= level_depth(&dom, &ids[p], &root, LEVEL));
            }
        }
    }

    #[test]
    fn open_then_reset_always_closes(depth in 1usize..14, open in 1usize..14) {
        let open = open.min(depth);
        let (mut m, c) = build(depth, 300.0, 40.0, MenuType::Overlap);
        open_to(&mut m, &c, open);
        prop_assert_eq!(m.current_level() as usize, open);

        m.reset_menu();
        prop_assert_eq!(m.current_level(), 0);
        prop_assert!(!m.is_open());
        prop_assert!(no_markers(&m, &c));
        prop_assert_eq!(m.host().transform(c.wrapper), Some(Transform::ZERO));
    }

    #[test]
    fn wrapper_translation_matches_formula(
        depth in 1usize..14,
        width in 100u32..1200,
        spacing in 0u32..120,
        cover in any::<bool>(),
    ) {
        let menu_type = if cover { MenuType::Cover } else { MenuType::Overlap };
        let (width, spacing) = (f64::from(width), f64::from(spacing));
        let (mut m, c) = build(depth, width, spacing, menu_type);

        simulate_click(&mut m, c.trigger);
        let mut level = 1u32;
        loop {
            let expected = match menu_type {
                MenuType::Overlap => width + f64::from(level - 1) * spacing,
                MenuType::Cover => width,
            };
            prop_assert_eq!(expected, wrapper_translation(menu_type, width, level, spacing));
            prop_assert_eq!(m.host().transform(c.wrapper), Some(Transform::TranslateX(expected)));
            let Some(link) = c.links.get(level as usize - 1) else { break };
            simulate_click(&mut m, *link);
            level += 1;
        }
        prop_assert_eq!(level as usize, depth);
    }

    #[test]
    fn backing_out_of_every_level_leaves_no_markers(depth in 1usize..14) {
        let (mut m, c) = build(depth, 300.0, 40.0, MenuType::Overlap);
        open_to(&mut m, &c, depth);
        prop_assert_eq!(m.current_level() as usize, depth);

        for (i, back) in c.backs.iter().enumerate().rev() {
            simulate_click(&mut m, *back);
            prop_assert_eq!(m.current_level() as usize, i);
        }
        prop_assert!(!m.is_open());
        prop_assert!(!m.is_outside_armed());
        prop_assert!(no_markers(&m, &c));
    }
}
