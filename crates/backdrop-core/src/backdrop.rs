use crate::config::{GraphConfig, LatticeConfig, RainConfig};
use crate::graph::NodeGraph;
use crate::lattice::BinaryLattice;
use crate::rain::SymbolRain;
use crate::scheduler::Scene;
use crate::surface::Surface;
use crate::theme::ThemeStore;

/// Full-page background: binary lattice, node graph and symbol rain, painted
/// in that order over a fading trail.
pub struct NetworkBackdrop {
    theme: ThemeStore,
    lattice: BinaryLattice,
    graph: NodeGraph,
    rain: SymbolRain,
}

impl NetworkBackdrop {
    pub fn new(theme: ThemeStore, width: u32, height: u32, seed: u64) -> Self {
        Self::with_config(
            theme,
            width,
            height,
            seed,
            LatticeConfig::default(),
            GraphConfig::default(),
            RainConfig::full_page(),
        )
    }

    pub fn with_config(
        theme: ThemeStore,
        width: u32,
        height: u32,
        seed: u64,
        lattice: LatticeConfig,
        graph: GraphConfig,
        rain: RainConfig,
    ) -> Self {
        Self {
            theme,
            lattice: BinaryLattice::new(lattice, width, height, seed),
            graph: NodeGraph::new(graph, width, height, seed.wrapping_add(1)),
            rain: SymbolRain::new(rain, width, height, seed.wrapping_add(2)),
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn rain(&self) -> &SymbolRain {
        &self.rain
    }

    pub fn lattice(&self) -> &BinaryLattice {
        &self.lattice
    }
}

impl Scene for NetworkBackdrop {
    fn resize(&mut self, width: u32, height: u32) {
        self.lattice.resize(width, height);
        self.graph.resize(width, height);
        self.rain.resize(width, height);
    }

    fn update(&mut self, _now: f64) {
        self.lattice.step();
        self.graph.step();
        self.rain.advance();
    }

    fn draw(&mut self, surface: &mut dyn Surface, _now: f64) {
        let theme = self.theme.snapshot();
        // The rain's fade fill goes first so it dims everything from the
        // previous frame, the lattice and graph included.
        self.rain.draw_fade(surface, &theme);
        self.lattice.draw(surface, &theme);
        self.graph.draw(surface, &theme);
        self.rain.draw_strokes(surface, &theme);
    }
}

/// Hero-section rain on its own canvas.
pub struct HeroRain {
    theme: ThemeStore,
    rain: SymbolRain,
}

impl HeroRain {
    pub fn new(theme: ThemeStore, width: u32, height: u32, seed: u64) -> Self {
        Self {
            theme,
            rain: SymbolRain::new(RainConfig::hero(), width, height, seed),
        }
    }

    pub fn rain(&self) -> &SymbolRain {
        &self.rain
    }
}

impl Scene for HeroRain {
    fn resize(&mut self, width: u32, height: u32) {
        self.rain.resize(width, height);
    }

    fn update(&mut self, _now: f64) {
        self.rain.advance();
    }

    fn draw(&mut self, surface: &mut dyn Surface, _now: f64) {
        let theme = self.theme.snapshot();
        self.rain.draw(surface, &theme);
    }
}
