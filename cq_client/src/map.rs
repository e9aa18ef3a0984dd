//! World map renderer drawn on a ratatui canvas.
//!
//! Country shapes are not drawn. Each country is a glyph at its anchor
//! point over ratatui's built-in world outline, coloured by its
//! [`MapFill`]. Zoom and pan move the canvas bounds; hovering is driven by
//! the keyboard, cycling through countries from west to east.

use country_quiz::{
    Catalog, CountryId,
    render::{HoverInfo, MapFill, MapRenderer, hover_info},
    session::DiscoveredSet,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block,
        canvas::{Canvas, Map, MapResolution},
    },
};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 8.0;
const ZOOM_STEP: f64 = 1.5;
/// Pan distance at zoom 1, in degrees
const PAN_STEP: f64 = 30.0;
const OUTLINE_COLOR: Color = Color::Rgb(0x1e, 0x29, 0x3b);

fn fill_color(fill: MapFill) -> Color {
    let (r, g, b) = fill.rgb();
    Color::Rgb(r, g, b)
}

fn fill_glyph(fill: MapFill) -> &'static str {
    match fill {
        MapFill::Discovered => "●",
        MapFill::Undiscovered => "·",
        MapFill::DiscoveredHover | MapFill::UndiscoveredHover => "◉",
    }
}

/// Visible part of the world, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub lon: f64,
    pub lat: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            lon: 0.0,
            lat: 0.0,
            zoom: MIN_ZOOM,
        }
    }
}

impl Viewport {
    fn half_width(&self) -> f64 {
        180.0 / self.zoom
    }

    fn half_height(&self) -> f64 {
        90.0 / self.zoom
    }

    #[must_use]
    pub fn x_bounds(&self) -> [f64; 2] {
        [self.lon - self.half_width(), self.lon + self.half_width()]
    }

    #[must_use]
    pub fn y_bounds(&self) -> [f64; 2] {
        [self.lat - self.half_height(), self.lat + self.half_height()]
    }

    #[must_use]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        (west..=east).contains(&lon) && (south..=north).contains(&lat)
    }

    /// Keep the view inside the world.
    fn clamp(&mut self) {
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let max_lon = 180.0 - self.half_width();
        let max_lat = 90.0 - self.half_height();
        self.lon = self.lon.clamp(-max_lon, max_lon);
        self.lat = self.lat.clamp(-max_lat, max_lat);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom *= factor;
        self.clamp();
    }

    /// Move by whole steps; a step shrinks as the zoom grows.
    pub fn pan(&mut self, east_steps: f64, north_steps: f64) {
        self.lon += east_steps * PAN_STEP / self.zoom;
        self.lat += north_steps * PAN_STEP / self.zoom;
        self.clamp();
    }

    pub fn center_on(&mut self, lon: f64, lat: f64) {
        self.lon = lon;
        self.lat = lat;
        self.clamp();
    }
}

/// A country as last rendered
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub id: CountryId,
    pub lon: f64,
    pub lat: f64,
    pub fill: MapFill,
}

/// Terminal map renderer
#[derive(Debug, Default)]
pub struct CanvasMap {
    viewport: Viewport,
    /// Anchors sorted west to east
    anchors: Vec<Anchor>,
    /// Index into `anchors` of the hovered country
    hovered: Option<usize>,
    hover: Option<HoverInfo>,
}

impl MapRenderer for CanvasMap {
    fn render(&mut self, catalog: &Catalog, discovered: &DiscoveredSet) {
        let hovered_id = self.hovered_id().cloned();

        let mut anchors: Vec<Anchor> = catalog
            .iter()
            .map(|country| Anchor {
                id: country.id.clone(),
                lon: country.lon,
                lat: country.lat,
                fill: MapFill::for_feature(
                    discovered,
                    country.id.as_str(),
                    hovered_id.as_ref() == Some(&country.id),
                ),
            })
            .collect();
        anchors.sort_by(|a, b| a.lon.total_cmp(&b.lon));

        self.hovered = hovered_id.and_then(|id| anchors.iter().position(|a| a.id == id));
        self.hover = self
            .hovered
            .map(|idx| hover_info(catalog, discovered, anchors[idx].id.as_str(), None));
        self.anchors = anchors;
    }

    fn hover(&self) -> Option<HoverInfo> {
        self.hover.clone()
    }

    fn reset_zoom(&mut self) {
        self.viewport = Viewport::default();
    }
}

impl CanvasMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    #[must_use]
    pub fn hovered_id(&self) -> Option<&CountryId> {
        self.hovered
            .and_then(|idx| self.anchors.get(idx))
            .map(|anchor| &anchor.id)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_by(1.0 / ZOOM_STEP);
    }

    pub fn pan(&mut self, east_steps: f64, north_steps: f64) {
        self.viewport.pan(east_steps, north_steps);
    }

    /// Hover the next country to the east, wrapping around.
    pub fn hover_next(&mut self) {
        let len = self.anchors.len();
        if len > 0 {
            self.set_hovered(self.hovered.map_or(0, |idx| (idx + 1) % len));
        }
    }

    /// Hover the next country to the west, wrapping around.
    pub fn hover_prev(&mut self) {
        let len = self.anchors.len();
        if len > 0 {
            self.set_hovered(self.hovered.map_or(len - 1, |idx| (idx + len - 1) % len));
        }
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
        self.hover = None;
    }

    fn set_hovered(&mut self, idx: usize) {
        self.hovered = Some(idx);
        let anchor = &self.anchors[idx];
        if !self.viewport.contains(anchor.lon, anchor.lat) {
            self.viewport.center_on(anchor.lon, anchor.lat);
        }
    }

    /// Draw the last rendered state into `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let glyphs: Vec<(f64, f64, Span<'static>)> = self
            .anchors
            .iter()
            .filter(|anchor| self.viewport.contains(anchor.lon, anchor.lat))
            .map(|anchor| {
                let style = Style::default().fg(fill_color(anchor.fill));
                (anchor.lon, anchor.lat, Span::styled(fill_glyph(anchor.fill), style))
            })
            .collect();

        let tooltip = self
            .hovered
            .and_then(|idx| self.anchors.get(idx))
            .zip(self.hover.as_ref().and_then(HoverInfo::tooltip))
            .map(|(anchor, text)| (anchor.lon, anchor.lat, text));

        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .title(" map  ")
                    .title_bottom(format!(" zoom x{:.1}  ", self.viewport.zoom)),
            )
            .marker(Marker::Braille)
            .x_bounds(self.viewport.x_bounds())
            .y_bounds(self.viewport.y_bounds())
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: OUTLINE_COLOR,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                for (lon, lat, glyph) in &glyphs {
                    ctx.print(*lon, *lat, glyph.clone());
                }
                if let Some((lon, lat, text)) = &tooltip {
                    ctx.print(*lon, *lat, Line::from(text.clone()).bold().white());
                }
            });
        frame.render_widget(canvas, area);
    }
}
