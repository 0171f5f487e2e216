use crate::light::Light;

const HEADER: [&str; 7] = ["ID", "NAME", "ON", "REACHABLE", "BRIGHTNESS", "HUE", "SAT"];
const PADDING: usize = 4;

fn row(light: &Light) -> [String; 7] {
    let s = &light.state;
    [
        light.id.to_string(),
        light.name.clone(),
        s.on.to_string(),
        s.reachable.to_string(),
        s.bri.to_string(),
        s.hue.to_string(),
        s.sat.to_string(),
    ]
}

/// Renders lights as left-aligned columns separated by at least four spaces.
/// Lights are printed in the order given.
pub fn render(lights: &[Light]) -> String {
    let rows: Vec<[String; 7]> = lights.iter().map(row).collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header = HEADER.map(String::from);
    let mut out = String::new();
    for r in std::iter::once(&header).chain(&rows) {
        let last = r.len() - 1;
        for (i, cell) in r.iter().enumerate() {
            out.push_str(cell);
            if i < last {
                let pad = widths[i] - cell.chars().count() + PADDING;
                out.extend(std::iter::repeat(' ').take(pad));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::LightState;

    fn light(id: u32, name: &str, bri: u8) -> Light {
        Light {
            id,
            name: name.into(),
            state: LightState {
                on: true,
                bri,
                hue: 8418,
                sat: 140,
                reachable: true,
            },
        }
    }

    #[test]
    fn columns_line_up() {
        let out = render(&[light(1, "Kitchen", 254), light(12, "Hall", 3)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ID    NAME       ON      REACHABLE    BRIGHTNESS    HUE     SAT"
        );
        assert_eq!(
            lines[1],
            "1     Kitchen    true    true         254           8418    140"
        );
        assert_eq!(
            lines[2],
            "12    Hall       true    true         3             8418    140"
        );
    }

    #[test]
    fn empty_list_prints_header() {
        assert_eq!(
            render(&[]),
            "ID    NAME    ON    REACHABLE    BRIGHTNESS    HUE    SAT\n"
        );
    }
}
