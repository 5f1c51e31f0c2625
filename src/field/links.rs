use bevy::math::Vec2;

/// Transient pairing of two same-population entities closer than a
/// threshold; rebuilt from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first endpoint (always the lower index)
    pub a: usize,
    /// Index of the second endpoint
    pub b: usize,
    /// Opacity derived from the endpoint distance
    pub opacity: f32,
}

/// Linear opacity falloff: `max_opacity` at distance 0, exactly 0 at the
/// threshold.
pub fn link_opacity(distance: f32, threshold: f32, max_opacity: f32) -> f32 {
    (1.0 - distance / threshold) * max_opacity
}

/// One pass over every unordered pair; each qualifying pair is recorded
/// exactly once, with `a < b`. Quadratic, which is fine for populations of
/// tens of entities.
pub fn collect_links(positions: &[Vec2], threshold: f32, max_opacity: f32, out: &mut Vec<Link>) {
    out.clear();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let distance = positions[i].distance(positions[j]);
            if distance < threshold {
                out.push(Link {
                    a: i,
                    b: j,
                    opacity: link_opacity(distance, threshold, max_opacity),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_boundaries() {
        assert_eq!(link_opacity(0.0, 150.0, 0.5), 0.5);
        assert_eq!(link_opacity(150.0, 150.0, 0.5), 0.0);
        assert!((link_opacity(75.0, 150.0, 0.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_pairs_are_never_double_counted() {
        let positions = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        ];
        let mut links = Vec::new();
        collect_links(&positions, 100.0, 0.5, &mut links);

        assert_eq!(links.len(), 3);
        for link in &links {
            assert!(link.a < link.b, "each unordered pair appears once");
        }
    }

    #[test]
    fn test_linking_is_symmetric() {
        let forward = vec![Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0)];
        let reversed = vec![Vec2::new(30.0, 40.0), Vec2::new(0.0, 0.0)];

        let mut a = Vec::new();
        let mut b = Vec::new();
        collect_links(&forward, 100.0, 0.5, &mut a);
        collect_links(&reversed, 100.0, 0.5, &mut b);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert!((a[0].opacity - b[0].opacity).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_excludes_distant_pairs() {
        let positions = vec![Vec2::new(0.0, 0.0), Vec2::new(150.0, 0.0)];
        let mut links = Vec::new();
        collect_links(&positions, 150.0, 0.5, &mut links);

        // At exactly the threshold the opacity would be 0, so nothing is kept
        assert!(links.is_empty());
    }

    #[test]
    fn test_rebuild_clears_previous_frame() {
        let near = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let far = vec![Vec2::new(0.0, 0.0), Vec2::new(500.0, 0.0)];

        let mut links = Vec::new();
        collect_links(&near, 100.0, 0.5, &mut links);
        assert_eq!(links.len(), 1);

        collect_links(&far, 100.0, 0.5, &mut links);
        assert!(links.is_empty(), "stale links must not survive");
    }
}
