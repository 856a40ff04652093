//! Equations legend for lensing simulations
//!
//! Lists the relations the core evaluates, for display next to the frame.

/// An equation with its name and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Format the legend as plain text
pub fn format_equations(title: &str, equations: &[Equation], variables: &[(&str, &str)]) -> String {
    let mut out = format!("{title}\n{}\n", "=".repeat(title.chars().count()));

    for eq in equations {
        out.push_str(&format!("{}\n    {}\n    {}\n", eq.name, eq.formula, eq.description));
    }

    if !variables.is_empty() {
        out.push_str("\nVariables\n");
        let width = variables.iter().map(|(s, _)| s.chars().count()).max().unwrap_or(0);
        for (symbol, meaning) in variables {
            let pad = width - symbol.chars().count();
            out.push_str(&format!("  {symbol}{}  {meaning}\n", " ".repeat(pad)));
        }
    }

    out
}

pub const LENSING_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Deflection Field",
        formula: "δ = I·M·(L - p) / (|L - p|² + ε)",
        description: "Zero inside the horizon |L - p| < 0.6M",
    },
    Equation {
        name: "Ray March",
        formula: "d ← s·(d + δ)/|d + δ|,  p ← p + d",
        description: "Fixed step length s, previous heading kept if d + δ = 0",
    },
    Equation {
        name: "Einstein Radius",
        formula: "θ_E = √(4GM/c² · D_LS/(D_L·D_S))",
        description: "Angular scale of a point-mass lens",
    },
    Equation {
        name: "Lens Equation",
        formula: "β = θ - θ_E²·θ/|θ|²",
        description: "Source position seen at image position θ",
    },
    Equation {
        name: "Photon Sphere",
        formula: "r_ph = 0.9M",
        description: "Drawn ring where light can orbit",
    },
];

pub const LENSING_VARIABLES: &[(&str, &str)] = &[
    ("M", "Lens mass"),
    ("I", "Warp intensity"),
    ("L", "Lens position"),
    ("p", "Sample position"),
    ("d", "Ray step direction"),
    ("θ", "Image-plane angle"),
    ("β", "Source-plane angle"),
    ("D_L, D_S", "Lens / source distance"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_lists_every_equation() {
        let text = format_equations("Gravitational Lensing", LENSING_EQUATIONS, LENSING_VARIABLES);
        for eq in LENSING_EQUATIONS {
            assert!(text.contains(eq.name));
        }
        assert!(text.contains("Lens mass"));
    }
}
