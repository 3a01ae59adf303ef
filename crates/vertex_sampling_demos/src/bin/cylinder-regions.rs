use glam::{DVec2, DVec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_sampling::prelude::*;
use vertex_sampling_demos::{render_layers_to_png, PointLayer, PointStyle, Projection, RenderConfig};

fn main() -> anyhow::Result<()> {
    let sampler = CylinderPointSampler::try_new(200.0, 220.0, 500.0)?.with_endcap_thickness(20.0);
    let mut rng = StdRng::seed_from_u64(7);

    let styles = [
        (Region::BodyVolume, [90, 170, 240]),
        (Region::EndcapsVolume, [240, 120, 90]),
        (Region::InnerSurface, [235, 235, 235]),
    ];

    let mut layers = Vec::with_capacity(styles.len());
    for (region, color) in styles {
        let points = (0..8_000)
            .map(|_| sampler.generate_vertex(region, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        layers.push(PointLayer::new(points, PointStyle { color, radius: 1 }));
    }

    // Shoot a few rays from the axis and mark where they leave the inner boundary.
    let hits = (0..64)
        .map(|i| {
            let a = f64::from(i) / 64.0 * std::f64::consts::TAU;
            sampler.intersect(DVec3::ZERO, DVec3::new(a.cos(), 0.0, a.sin()))
        })
        .collect::<Result<Vec<_>>>()?;
    layers.push(PointLayer::new(
        hits,
        PointStyle {
            color: [120, 230, 120],
            radius: 4,
        },
    ));

    let config = RenderConfig::new((600, 1200), DVec2::new(500.0, 1100.0))
        .with_projection(Projection::XZ);
    render_layers_to_png(&layers, &config, "cylinder-regions.png")?;

    Ok(())
}
