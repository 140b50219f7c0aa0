use super::*;
use crate::domain::dataset::DataSet;
use crate::render::{CommandList, DrawCommand};
use crate::spatial::WorldOptions;

fn patches(max: i32) -> Patches {
    Patches::new(WorldBounds::new(&WorldOptions::centered(max, 2)).unwrap())
}

#[test]
fn populates_one_patch_per_cell() {
    let p = patches(3);
    assert_eq!(p.len(), 49);
    assert_eq!(p.agents().len(), 49);
    let view = p.get(0).unwrap();
    assert_eq!((view.x(), view.y()), (-3, 3));
    assert!(p.get(49).is_none());
}

#[test]
fn neighbors_exclude_self_and_shrink_at_edges() {
    let p = patches(3);
    for id in p.ids() {
        let n8 = p.neighbors(id).unwrap();
        let n4 = p.neighbors4(id).unwrap();
        assert!(!n8.contains(&id));
        assert!(n8.len() <= 8 && n4.len() <= 4);
        let (x, y) = p.xy(id);
        let edges = (x.abs() == 3) as usize + (y.abs() == 3) as usize;
        let (e8, e4) = match edges {
            0 => (8, 4),
            1 => (5, 3),
            _ => (3, 2),
        };
        assert_eq!((n8.len(), n4.len()), (e8, e4), "patch ({}, {})", x, y);
    }
}

#[test]
fn diffuse_conserves_interior_mass() {
    let mut p = patches(8);
    p.own("heat").unwrap();
    // pattern at least two cells away from the edges
    for id in p.ids() {
        let (x, y) = p.xy(id);
        if x.abs() <= 4 && y.abs() <= 4 {
            p.set_value(id, "heat", ((x * 7 + y * 3).rem_euclid(5)) as f64).unwrap();
        }
    }
    let interior = |p: &Patches| -> f64 {
        p.ids()
            .filter(|&id| {
                let (x, y) = p.xy(id);
                x.abs() < 8 && y.abs() < 8
            })
            .map(|id| p.value(id, "heat").unwrap())
            .sum()
    };
    let before = interior(&p);
    p.diffuse("heat", 0.3, None, 0.0, 1.0).unwrap();
    assert!((interior(&p) - before).abs() < 1e-9);
}

#[test]
fn diffuse_keeps_global_mass_with_edges() {
    let mut p = patches(2);
    p.own("v").unwrap();
    for id in p.ids() {
        p.set_value(id, "v", id as f64).unwrap();
    }
    let total: f64 = p.agents().props(BreedId::BASE, "v").unwrap().iter().sum();
    p.diffuse4("v", 0.5, None, 0.0, 1.0).unwrap();
    let after: f64 = p.agents().props(BreedId::BASE, "v").unwrap().iter().sum();
    assert!((after - total).abs() < 1e-9);
}

#[test]
fn diffuse_is_order_independent() {
    // same input on a mirrored grid gives the mirrored result
    let mut a = patches(3);
    let mut b = patches(3);
    a.own("v").unwrap();
    b.own("v").unwrap();
    let last = a.len() as AgentId - 1;
    for id in a.ids() {
        let v = (id * id % 11) as f64;
        a.set_value(id, "v", v).unwrap();
        b.set_value(last - id, "v", v).unwrap();
    }
    a.diffuse("v", 0.4, None, 0.0, 1.0).unwrap();
    b.diffuse("v", 0.4, None, 0.0, 1.0).unwrap();
    for id in a.ids() {
        let va = a.value(id, "v").unwrap();
        let vb = b.value(last - id, "v").unwrap();
        assert!((va - vb).abs() < 1e-12);
    }
}

#[test]
fn diffuse_rejects_bad_neighbor_count() {
    let mut p = patches(1);
    p.own("v").unwrap();
    assert!(matches!(
        p.diffuse_n(6, "v", 0.1, None, 0.0, 1.0),
        Err(EngineError::InvalidNeighborCount(6))
    ));
    assert!(matches!(
        p.diffuse("missing", 0.1, None, 0.0, 1.0),
        Err(EngineError::UnknownVariable(_))
    ));
}

#[test]
fn diffuse_rejects_breed_only_variable() {
    let mut p = patches(1);
    let hot = p.patch_breeds("hot")[0];
    p.agents_mut().own(hot, "heat").unwrap();
    p.set_breed(4, hot).unwrap();
    p.set_value(4, "heat", 9.0).unwrap();
    assert!(matches!(
        p.diffuse("heat", 0.5, None, 0.0, 1.0),
        Err(EngineError::NotSharedVariable(_))
    ));
    assert_eq!(p.value(4, "heat").unwrap(), 9.0);
}

#[test]
fn out_of_range_ids_are_errors() {
    let mut p = patches(2);
    let past = p.len() as AgentId;
    assert!(matches!(p.neighbors(past), Err(EngineError::UnknownAgent(id)) if id == past));
    assert!(matches!(p.neighbors4(u32::MAX), Err(EngineError::UnknownAgent(_))));
    assert_eq!(p.color(past), None);
    assert!(matches!(p.set_color(past, Color::RED), Err(EngineError::UnknownAgent(_))));
    assert!(p.get(past).is_none());
    assert!(p.value(past, "v").is_err());
}

#[test]
fn diffuse_recolors_with_map() {
    let mut p = patches(1);
    p.own("v").unwrap();
    let center = p.patch_xy(0, 0).unwrap();
    p.set_value(center, "v", 1.0).unwrap();
    let map = ColorMap::gray(256);
    p.diffuse("v", 0.0, Some(&map), 0.0, 1.0).unwrap();
    assert_eq!(p.color(center), Some(Color::WHITE));
    assert_eq!(p.color(0), Some(Color::BLACK));
}

#[test]
fn float_patch_lookup_rounds_and_clips() {
    let p = patches(3);
    assert_eq!(p.patch(0.4, -0.4), p.patch_xy(0, 0));
    assert_eq!(p.patch(-3.5, 3.4), p.patch_xy(-3, 3));
    assert_eq!(p.patch(0.0, 3.5), None);
    assert_eq!(p.patch(3.6, 0.0), None);
}

#[test]
fn heading_zero_is_north() {
    let p = patches(3);
    assert_eq!(p.patch_at_heading_and_distance(0.0, 0.0, 0.0, 2.0), p.patch_xy(0, 2));
    assert_eq!(p.patch_at_heading_and_distance(0.0, 0.0, 90.0, 1.0), p.patch_xy(1, 0));
    assert_eq!(p.patch_at_heading_and_distance(0.0, 0.0, 180.0, 9.0), None);
}

#[test]
fn radius_and_cone() {
    let p = patches(5);
    let center = p.patch_xy(0, 0).unwrap();
    assert_eq!(p.in_radius(center, 1, true).len(), 5);
    assert_eq!(p.in_radius(center, 1, false).len(), 4);
    assert_eq!(p.in_square(center, 1, true).len(), 9);

    // narrow cone pointing east
    let cone = p.in_cone(center, 3, 0.1, 0.0, false);
    let xs: Vec<_> = cone.iter().map(|&id| p.xy(id)).collect();
    assert_eq!(xs, vec![(1, 0), (2, 0), (3, 0)]);
}

#[test]
fn rect_clips_at_corner() {
    let p = patches(2);
    let corner = p.patch_xy(-2, 2).unwrap();
    assert_eq!(p.patch_rect(corner, 1, 1, true).len(), 4);
    assert_eq!(p.in_rect(corner, 2, 1, false).len(), 5);
}

#[test]
fn patch_view_reads_through() {
    let mut p = patches(2);
    p.own("v").unwrap();
    let id = p.patch_xy(1, 1).unwrap();
    p.set_value(id, "v", 2.5).unwrap();
    p.set_color(id, Color::RED).unwrap();
    p.set_label(id, Some("hi"));
    let view = p.get(id).unwrap();
    assert_eq!(view.get("v").unwrap(), 2.5);
    assert_eq!(view.color(), Color::RED);
    assert_eq!(view.label(), Some("hi"));
    assert_eq!(view.patch_at(-1, -1).map(|q| q.id()), p.patch_xy(0, 0));
    assert!(view.patch_at(5, 0).is_none());
    assert_eq!(view.breed().unwrap(), BreedId::BASE);
}

#[test]
fn breeds_and_reassignment() {
    let mut p = patches(1);
    let breeds = p.patch_breeds("fires embers");
    assert_eq!(breeds.len(), 2);
    p.set_breed(4, breeds[0]).unwrap();
    assert_eq!(p.agents().members(breeds[0]).unwrap(), &[4]);
    p.set_breed(4, breeds[1]).unwrap();
    assert!(p.agents().members(breeds[0]).unwrap().is_empty());
    assert_eq!(p.get(4).unwrap().breed().unwrap(), breeds[1]);
}

#[test]
fn dataset_round_trip_and_resample() {
    let mut p = patches(1);
    p.own("elev").unwrap();
    let ds = DataSet::new(2, 2, vec![0.0, 2.0, 4.0, 6.0]).unwrap();
    p.import_dataset(&ds, "elev", false).unwrap();
    // 3x3 grid, bilinear from the 2x2 corners
    assert_eq!(p.value(0, "elev").unwrap(), 0.0);
    assert_eq!(p.value(4, "elev").unwrap(), 3.0);
    assert_eq!(p.value(8, "elev").unwrap(), 6.0);
    let out = p.export_dataset("elev").unwrap();
    assert_eq!((out.width(), out.height()), (3, 3));
    assert_eq!(out.get_xy(1, 1), 3.0);
}

#[test]
fn install_colors_scales_image() {
    let mut p = patches(1);
    let img = image::RgbaImage::from_pixel(6, 6, image::Rgba([10, 20, 30, 255]));
    p.pixels_mut().install_colors(&img);
    assert!(p.ids().all(|id| p.color(id) == Some(Color::rgb(10, 20, 30))));
    assert!(p.pixels_mut().install_rgba(2, 2, vec![0; 15]).is_err());
}

#[test]
fn draw_emits_pixels_then_labels() {
    let mut p = patches(1);
    p.set_label(0, Some("a"));
    p.set_label(8, Some("b"));
    p.set_label(8, None);
    let mut list = CommandList::new();
    p.draw(&mut list);
    assert_eq!(list.len(), 2);
    assert_eq!(list.commands()[0], DrawCommand::Pixels { width: 3, height: 3, scale: 2 });
    match &list.commands()[1] {
        DrawCommand::Text { text, x, y, .. } => {
            assert_eq!(text, "a");
            assert_eq!((*x, *y), (1.0, 1.0));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn set_patch_size_keeps_grid() {
    let mut p = patches(2);
    p.set_patch_size(7).unwrap();
    assert_eq!(p.world().px_width, 35);
    assert_eq!(p.len(), 25);
    assert!(p.set_patch_size(0).is_err());
}
