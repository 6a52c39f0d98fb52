use super::*;
use crate::catalog::StaticCatalog;
use crate::checkout::PermalinkCheckout;
use crate::config::AppConfig;
use crate::data;
use crate::storage::MemoryStorage;
use crate::store::SelectionStore;
use crate::types::{CartKind, Offset};
use eframe::egui;

fn app() -> GalleryApp {
    let store = SelectionStore::load(Box::new(MemoryStorage::new()), AppConfig::default());
    GalleryApp::new(
        store,
        Box::new(StaticCatalog::bundled()),
        Box::new(PermalinkCheckout::new(Some("shop.example.com".into()))),
    )
}

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Runs one frame that only draws the wall.
fn wall_frame(ctx: &egui::Context, app: &mut GalleryApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_wall(ui);
        });
    });
}

fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

/// Drives hover, press, move and release over separate frames.
fn drag_on_wall(ctx: &egui::Context, app: &mut GalleryApp, from: egui::Pos2, to: egui::Pos2) {
    wall_frame(ctx, app, vec![egui::Event::PointerMoved(from)]);
    wall_frame(ctx, app, vec![press(from, true)]);
    wall_frame(ctx, app, vec![egui::Event::PointerMoved(to)]);
    wall_frame(ctx, app, vec![press(to, false)]);
}

/// Input for one frame in which `key` is pressed with Cmd/Ctrl held.
fn shortcut(key: egui::Key, shift: bool) -> egui::RawInput {
    let modifiers = egui::Modifiers {
        shift,
        alt: false,
        ctrl: false,
        mac_cmd: false,
        command: true,
    };
    let mut raw = raw_input(vec![egui::Event::Key {
        key,
        physical_key: Some(key),
        pressed: true,
        repeat: false,
        modifiers,
    }]);
    // egui reads shortcut modifiers from the frame input, not the event
    raw.modifiers = modifiers;
    raw
}

#[test]
fn catalog_loads_without_a_runtime() {
    let mut app = app();
    app.request_catalog(None);
    let ctx = egui::Context::default();
    let _ = ctx.run(raw_input(vec![]), |ctx| app.handle_pending_jobs(ctx));
    assert_eq!(app.catalog_status, CatalogStatus::Ready);
    assert!(!app.store.catalog().is_empty());
    assert_eq!(app.reveal.visible(), app.store.filtered_artworks().len());
}

#[test]
fn dragging_the_wall_moves_the_group_and_undo_restores_it() {
    let mut app = app();
    let ctx = egui::Context::default();

    drag_on_wall(&ctx, &mut app, egui::pos2(400.0, 300.0), egui::pos2(500.0, 340.0));

    let offset = app.store.selection().group_offset;
    assert!((offset.x - 100.0).abs() < 0.5, "{offset:?}");
    assert!((offset.y - 40.0).abs() < 0.5, "{offset:?}");
    assert!(app.press.is_none());

    let _ = ctx.run(shortcut(egui::Key::Z, false), |ctx| {
        app.handle_undo_redo_keys(ctx);
    });
    assert_eq!(app.store.selection().group_offset, Offset::ZERO);

    let _ = ctx.run(shortcut(egui::Key::Y, false), |ctx| {
        app.handle_undo_redo_keys(ctx);
    });
    assert!((app.store.selection().group_offset.x - 100.0).abs() < 0.5);

    let _ = ctx.run(shortcut(egui::Key::Z, false), |ctx| {
        app.handle_undo_redo_keys(ctx);
    });
    assert_eq!(app.store.selection().group_offset, Offset::ZERO);

    let _ = ctx.run(shortcut(egui::Key::Z, true), |ctx| {
        app.handle_undo_redo_keys(ctx);
    });
    let offset = app.store.selection().group_offset;
    assert!((offset.x - 100.0).abs() < 0.5 && (offset.y - 40.0).abs() < 0.5, "{offset:?}");
}

#[test]
fn dragging_past_the_edge_settles_on_the_boundary() {
    let mut app = app();
    let ctx = egui::Context::default();

    drag_on_wall(&ctx, &mut app, egui::pos2(100.0, 300.0), egui::pos2(1100.0, 300.0));

    let offset = app.store.selection().group_offset;
    assert_eq!(offset.x, app.store.config().drag.boundary.right);
}

#[test]
fn clicking_a_frame_makes_it_the_active_slot() {
    let mut app = app();
    let layout = data::layouts().into_iter().find(|l| l.id == "trio").unwrap();
    app.store.request_layout_change(layout);
    let ctx = egui::Context::default();

    wall_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(egui::pos2(1.0, 1.0))]);
    let target = app.frame_screen_rect(2).expect("frame is drawn").center();

    wall_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(target)]);
    wall_frame(&ctx, &mut app, vec![press(target, true)]);
    wall_frame(&ctx, &mut app, vec![press(target, false)]);

    assert_eq!(app.active_slot, Some(2));
    assert_eq!(app.store.selection().group_offset, Offset::ZERO);
}

#[test]
fn unlocked_drag_moves_only_the_pressed_frame() {
    let mut app = app();
    let layout = data::layouts().into_iter().find(|l| l.id == "duo").unwrap();
    app.store.request_layout_change(layout);
    app.store.set_locked(false);
    let ctx = egui::Context::default();

    wall_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(egui::pos2(1.0, 1.0))]);
    let start = app.frame_screen_rect(0).unwrap().center();
    let other_before = app.frame_screen_rect(1).unwrap();

    drag_on_wall(&ctx, &mut app, start, start + egui::vec2(-30.0, 60.0));

    let moved = app.store.selection().individual_offsets.get(&0).copied();
    let moved = moved.expect("frame 0 has an offset");
    assert!((moved.x + 30.0).abs() < 0.5 && (moved.y - 60.0).abs() < 0.5, "{moved:?}");
    assert_eq!(app.frame_screen_rect(1).unwrap(), other_before);
    assert_eq!(app.store.selection().group_offset, Offset::ZERO);
}

#[test]
fn undo_shortcut_is_ignored_while_typing() {
    let mut app = app();
    app.store.select_place(data::places()[0].clone());
    let ctx = egui::Context::default();

    let mut text = String::new();
    let id = egui::Id::new("search");
    let _ = ctx.run(raw_input(vec![]), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(egui::TextEdit::singleline(&mut text).id(id));
        });
        ctx.memory_mut(|m| m.request_focus(id));
    });
    let _ = ctx.run(shortcut(egui::Key::Z, false), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(egui::TextEdit::singleline(&mut text).id(id));
        });
        app.handle_undo_redo_keys(ctx);
    });
    assert!(app.store.selection().selected_place.is_some());

    // Once the field loses focus the same shortcut undoes the room choice
    let _ = ctx.run(raw_input(vec![]), |ctx| {
        ctx.memory_mut(|m| m.surrender_focus(id));
    });
    let _ = ctx.run(shortcut(egui::Key::Z, false), |ctx| {
        app.handle_undo_redo_keys(ctx);
    });
    assert!(app.store.selection().selected_place.is_none());
}

#[test]
fn full_frame_renders_every_step() {
    let mut app = app();
    app.request_catalog(None);
    let layout = data::layouts().into_iter().find(|l| l.id == "duo").unwrap();
    app.store.request_layout_change(layout);
    app.active_slot = Some(0);
    let ctx = egui::Context::default();

    for step in crate::types::Step::ALL {
        app.store.go_to_step(step);
        let _ = ctx.run(raw_input(vec![]), |ctx| app.draw(ctx));
    }
    assert_eq!(app.catalog_status, CatalogStatus::Ready);
}

#[test]
fn cart_window_closes_through_the_store() {
    let mut app = app();
    let layout = data::layouts().into_iter().find(|l| l.id == "single").unwrap();
    app.store.request_layout_change(layout);
    let artwork = crate::catalog::StaticCatalog::bundled().parse().unwrap().remove(0);
    app.store.assign_artwork(0, artwork);
    app.store.handle_add_to_cart();
    assert!(app.store.selection().show_cart);
    assert_eq!(app.store.cart_item_count(), 1);

    app.store.set_quantity(CartKind::Artwork, 0, 3);
    app.store.toggle_cart();
    assert!(!app.store.selection().show_cart);
    assert_eq!(app.store.cart_item_count(), 3);
}
