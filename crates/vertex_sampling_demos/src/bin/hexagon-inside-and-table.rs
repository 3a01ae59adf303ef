use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_sampling::prelude::*;
use vertex_sampling_demos::{render_layers_to_png, PointLayer, PointStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    let navigator = HexagonNavigator::try_new(100.0, 10.0, 12.0)?;
    println!(
        "ring order {}, cell count {}, element radius {:.3}",
        navigator.ring_order(),
        navigator.cell_count(),
        navigator.element_radius()
    );

    let mut rng = StdRng::seed_from_u64(6);
    let inside = (0..15_000)
        .map(|_| navigator.generate_vertex(Region::Inside, &mut rng))
        .collect::<Result<Vec<_>>>()?;

    let cells = navigator.tessellate_with_fixed_pitch(20.0)?;

    // Serve the look-up-table lattice one vertex per event.
    let binning = 4.0;
    let events = 10_000;
    let mut table = navigator.vertex_table(binning, 0.0, events)?;
    let mut lattice = Vec::with_capacity(table.len());
    while table.remaining() > 0 {
        lattice.push(table.next_vertex()?);
    }
    println!("table served {} vertices", lattice.len());

    let layers = [
        PointLayer::new(
            inside,
            PointStyle {
                color: [90, 170, 240],
                radius: 1,
            },
        ),
        PointLayer::new(
            cells,
            PointStyle {
                color: [240, 120, 90],
                radius: 4,
            },
        ),
        PointLayer::new(
            lattice,
            PointStyle {
                color: [120, 230, 120],
                radius: 2,
            },
        ),
    ];
    let config = RenderConfig::new((1000, 1000), DVec2::new(220.0, 220.0));
    render_layers_to_png(&layers, &config, "hexagon-inside-and-table.png")?;

    Ok(())
}
