//! Built-in reference data.

use std::collections::BTreeMap;

use super::{
    AmpacityGrid, ConductorData, ConduitMaterial, ConduitSize, ConduitTypeAreas, Impedance,
    Material, StandardOcp, TempRating, WireInfo, WireSize,
};

use WireSize::*;

fn zip_sizes(sizes: &[WireSize], values: &[f64]) -> Vec<(WireSize, f64)> {
    sizes.iter().copied().zip(values.iter().copied()).collect()
}

/// NEC 310.16 ampacities.
pub(super) fn ampacity() -> AmpacityGrid {
    let cu_sizes = &WireSize::ALL[..];
    let al_sizes = &WireSize::ALL[1..];

    let mut grid = AmpacityGrid::default();
    grid.set_row(
        Material::Copper,
        TempRating::C60,
        zip_sizes(
            cu_sizes,
            &[
                15.0, 20.0, 30.0, 40.0, 55.0, 70.0, 85.0, 95.0, 110.0, 125.0, 145.0, 165.0, 195.0,
                215.0, 240.0, 260.0, 280.0, 320.0, 355.0, 385.0, 400.0, 410.0, 435.0, 455.0, 495.0,
                520.0, 545.0, 560.0,
            ],
        ),
    );
    grid.set_row(
        Material::Copper,
        TempRating::C75,
        zip_sizes(
            cu_sizes,
            &[
                20.0, 25.0, 35.0, 50.0, 65.0, 85.0, 100.0, 115.0, 130.0, 150.0, 175.0, 200.0,
                230.0, 255.0, 285.0, 310.0, 335.0, 380.0, 420.0, 460.0, 475.0, 490.0, 520.0, 545.0,
                590.0, 625.0, 650.0, 665.0,
            ],
        ),
    );
    grid.set_row(
        Material::Copper,
        TempRating::C90,
        zip_sizes(
            cu_sizes,
            &[
                25.0, 30.0, 40.0, 55.0, 75.0, 95.0, 110.0, 130.0, 150.0, 170.0, 195.0, 225.0,
                260.0, 290.0, 320.0, 350.0, 380.0, 430.0, 475.0, 520.0, 535.0, 555.0, 585.0, 615.0,
                665.0, 705.0, 735.0, 750.0,
            ],
        ),
    );
    grid.set_row(
        Material::Aluminum,
        TempRating::C60,
        zip_sizes(
            al_sizes,
            &[
                15.0, 25.0, 35.0, 40.0, 55.0, 65.0, 75.0, 90.0, 100.0, 120.0, 135.0, 155.0, 170.0,
                190.0, 210.0, 225.0, 260.0, 285.0, 310.0, 320.0, 330.0, 355.0, 375.0, 405.0, 435.0,
                455.0, 470.0,
            ],
        ),
    );
    grid.set_row(
        Material::Aluminum,
        TempRating::C75,
        zip_sizes(
            al_sizes,
            &[
                20.0, 30.0, 40.0, 50.0, 65.0, 75.0, 90.0, 100.0, 120.0, 135.0, 155.0, 180.0, 205.0,
                230.0, 250.0, 270.0, 310.0, 340.0, 375.0, 385.0, 395.0, 425.0, 445.0, 485.0, 520.0,
                545.0, 560.0,
            ],
        ),
    );
    grid.set_row(
        Material::Aluminum,
        TempRating::C90,
        zip_sizes(
            al_sizes,
            &[
                25.0, 35.0, 45.0, 60.0, 75.0, 85.0, 100.0, 115.0, 135.0, 150.0, 175.0, 205.0,
                230.0, 255.0, 280.0, 305.0, 350.0, 385.0, 420.0, 435.0, 450.0, 480.0, 500.0, 545.0,
                585.0, 615.0, 630.0,
            ],
        ),
    );
    grid
}

/// Chapter 9 Table 5 conductor areas and Table 8 circular mils.
pub(super) fn conductors() -> BTreeMap<WireSize, ConductorData> {
    // (size, cmil, THHN/THWN/THWN-2, RHW, XHHW/XHHW-2/XHH)
    const ROWS: [(WireSize, f64, f64, f64, f64); 24] = [
        (Awg14, 4110.0, 0.0097, 0.0293, 0.0139),
        (Awg12, 6530.0, 0.0133, 0.0353, 0.0181),
        (Awg10, 10380.0, 0.0211, 0.0437, 0.0243),
        (Awg8, 16510.0, 0.0366, 0.0835, 0.0437),
        (Awg6, 26240.0, 0.0507, 0.1041, 0.0590),
        (Awg4, 41740.0, 0.0824, 0.1333, 0.0814),
        (Awg3, 52620.0, 0.0973, 0.1521, 0.0962),
        (Awg2, 66360.0, 0.1158, 0.1750, 0.1146),
        (Awg1, 83690.0, 0.1562, 0.2660, 0.1534),
        (Awg1_0, 105600.0, 0.1855, 0.3039, 0.1825),
        (Awg2_0, 133100.0, 0.2223, 0.3505, 0.2190),
        (Awg3_0, 167800.0, 0.2679, 0.4072, 0.2642),
        (Awg4_0, 211600.0, 0.3237, 0.4754, 0.3197),
        (Kcmil250, 250000.0, 0.3970, 0.6291, 0.3904),
        (Kcmil300, 300000.0, 0.4608, 0.7088, 0.4536),
        (Kcmil350, 350000.0, 0.5242, 0.7870, 0.5166),
        (Kcmil400, 400000.0, 0.5863, 0.8626, 0.5782),
        (Kcmil500, 500000.0, 0.7073, 1.0082, 0.6984),
        (Kcmil600, 600000.0, 0.8676, 1.2135, 0.8709),
        (Kcmil700, 700000.0, 0.9887, 1.3561, 0.9923),
        (Kcmil750, 750000.0, 1.0496, 1.4272, 1.0532),
        (Kcmil800, 800000.0, 1.1085, 1.4957, 1.1122),
        (Kcmil900, 900000.0, 1.2311, 1.6377, 1.2351),
        (Kcmil1000, 1000000.0, 1.3478, 1.7719, 1.3519),
    ];

    ROWS.iter()
        .map(|&(size, cmil, thhn, rhw, xhhw)| {
            let mut area = BTreeMap::new();
            for key in ["THHN", "THWN", "THWN-2"] {
                area.insert(key.to_string(), thhn);
            }
            area.insert("RHW".to_string(), rhw);
            for key in ["XHHW", "XHHW-2", "XHH"] {
                area.insert(key.to_string(), xhhw);
            }
            (size, ConductorData { cmil, area })
        })
        .collect()
}

/// Chapter 9 Table 4, 40% fill column base areas.
pub(super) fn conduits() -> Vec<ConduitTypeAreas> {
    fn entry(conduit_type: &str, material: ConduitMaterial, areas: &[f64]) -> ConduitTypeAreas {
        ConduitTypeAreas {
            conduit_type: conduit_type.to_string(),
            material,
            areas: ConduitSize::ALL
                .iter()
                .copied()
                .zip(areas.iter().copied())
                .collect(),
        }
    }

    let pvc = [
        0.2850, 0.5080, 0.8320, 1.4530, 1.9860, 3.2910, 4.6950, 7.2680, 9.7370, 12.5540, 19.7610,
        28.5670,
    ];

    use ConduitMaterial::{Magnetic, NonMagnetic};
    vec![
        entry("PVC", NonMagnetic, &pvc),
        entry("PVC-40", NonMagnetic, &pvc),
        entry(
            "PVC-80",
            NonMagnetic,
            &[
                0.2170, 0.4090, 0.6880, 1.2370, 1.7110, 2.8740, 4.1190, 6.4420, 8.6880, 11.2580,
                17.8550, 25.5980,
            ],
        ),
        entry(
            "ENT",
            NonMagnetic,
            &[0.2850, 0.5080, 0.8320, 1.4530, 1.9860, 3.2910],
        ),
        entry(
            "LFNC-A",
            NonMagnetic,
            &[0.3120, 0.5350, 0.8540, 1.5020, 2.0180, 3.3430],
        ),
        entry(
            "LFNC-B",
            NonMagnetic,
            &[0.3140, 0.5410, 0.8730, 1.5280, 1.9810, 3.2460],
        ),
        entry(
            "EMT",
            Magnetic,
            &[
                0.3040, 0.5330, 0.8640, 1.4960, 2.0360, 3.3560, 5.8580, 8.8460, 11.5450, 14.7530,
            ],
        ),
        entry(
            "RMC",
            Magnetic,
            &[
                0.3140, 0.5790, 0.8870, 1.5260, 2.0710, 3.4080, 4.8660, 7.4990, 10.0100, 12.8820,
                20.2120, 29.1580,
            ],
        ),
        entry(
            "FMC",
            Magnetic,
            &[
                0.3170, 0.5330, 0.8170, 1.2770, 1.8580, 3.2690, 4.9090, 7.0690, 9.6210, 12.5660,
            ],
        ),
        entry(
            "IMC",
            Magnetic,
            &[
                0.3420, 0.5860, 0.9590, 1.6470, 2.2250, 3.6300, 5.1350, 7.9220, 10.5840, 13.6310,
            ],
        ),
        entry(
            "LFMC",
            Magnetic,
            &[
                0.3140, 0.5410, 0.8730, 1.5280, 1.9810, 3.2460, 4.8810, 7.4750, 9.7310, 12.6920,
            ],
        ),
    ]
}

/// NEC 250.122 equipment grounding conductors.
pub(super) fn egc() -> BTreeMap<Material, Vec<(f64, WireSize)>> {
    let copper = vec![
        (15.0, Awg14),
        (20.0, Awg12),
        (30.0, Awg10),
        (40.0, Awg10),
        (60.0, Awg10),
        (100.0, Awg8),
        (200.0, Awg6),
        (300.0, Awg4),
        (400.0, Awg3),
        (500.0, Awg2),
        (600.0, Awg1),
        (800.0, Awg1_0),
        (1000.0, Awg2_0),
        (1200.0, Awg3_0),
        (1600.0, Awg4_0),
        (2000.0, Kcmil250),
        (2500.0, Kcmil350),
        (3000.0, Kcmil400),
        (4000.0, Kcmil500),
        (5000.0, Kcmil700),
        (6000.0, Kcmil800),
    ];
    // Aluminum stops at 4000 A; the 5000/6000 A rows call for 1200 kcmil,
    // which has no conductor data.
    let aluminum = vec![
        (15.0, Awg12),
        (20.0, Awg10),
        (30.0, Awg8),
        (40.0, Awg8),
        (60.0, Awg8),
        (100.0, Awg6),
        (200.0, Awg4),
        (300.0, Awg2),
        (400.0, Awg1),
        (500.0, Awg1_0),
        (600.0, Awg2_0),
        (800.0, Awg3_0),
        (1000.0, Awg4_0),
        (1200.0, Kcmil250),
        (1600.0, Kcmil350),
        (2000.0, Kcmil400),
        (2500.0, Kcmil600),
        (3000.0, Kcmil600),
        (4000.0, Kcmil800),
    ];
    BTreeMap::from([(Material::Copper, copper), (Material::Aluminum, aluminum)])
}

/// Chapter 9 Table 9 AC resistance and reactance, ohms per 1000 ft.
pub(super) fn impedance() -> BTreeMap<WireSize, Impedance> {
    // (size, X pvc, X steel, CU R pvc, CU R steel, AL R pvc, AL R steel)
    const ROWS: [(WireSize, f64, f64, f64, f64, f64, f64); 20] = [
        (Awg12, 0.054, 0.068, 2.00, 2.00, 3.20, 3.20),
        (Awg10, 0.050, 0.063, 1.20, 1.20, 2.00, 2.00),
        (Awg8, 0.052, 0.065, 0.78, 0.78, 1.30, 1.30),
        (Awg6, 0.051, 0.064, 0.49, 0.49, 0.81, 0.81),
        (Awg4, 0.048, 0.060, 0.31, 0.31, 0.51, 0.51),
        (Awg3, 0.047, 0.059, 0.25, 0.25, 0.40, 0.40),
        (Awg2, 0.045, 0.057, 0.19, 0.20, 0.32, 0.32),
        (Awg1, 0.046, 0.057, 0.15, 0.16, 0.25, 0.25),
        (Awg1_0, 0.044, 0.055, 0.12, 0.12, 0.20, 0.20),
        (Awg2_0, 0.043, 0.054, 0.10, 0.10, 0.16, 0.16),
        (Awg3_0, 0.042, 0.052, 0.077, 0.079, 0.13, 0.13),
        (Awg4_0, 0.041, 0.051, 0.062, 0.063, 0.10, 0.10),
        (Kcmil250, 0.041, 0.052, 0.052, 0.054, 0.085, 0.086),
        (Kcmil300, 0.041, 0.051, 0.044, 0.045, 0.071, 0.072),
        (Kcmil350, 0.040, 0.050, 0.038, 0.039, 0.061, 0.063),
        (Kcmil400, 0.040, 0.049, 0.033, 0.035, 0.054, 0.055),
        (Kcmil500, 0.039, 0.048, 0.027, 0.029, 0.043, 0.045),
        (Kcmil600, 0.039, 0.048, 0.023, 0.025, 0.036, 0.038),
        (Kcmil750, 0.038, 0.048, 0.019, 0.021, 0.029, 0.031),
        (Kcmil1000, 0.037, 0.046, 0.015, 0.018, 0.023, 0.025),
    ];

    ROWS.iter()
        .map(|&(size, x_pvc, x_steel, cu_pvc, cu_steel, al_pvc, al_steel)| {
            (
                size,
                Impedance::new((cu_steel, cu_pvc), (al_steel, al_pvc), (x_steel, x_pvc)),
            )
        })
        .collect()
}

/// Standard breaker ratings with frame and switch sizes.
pub(super) fn standard_ocp() -> Vec<StandardOcp> {
    const ROWS: [(f64, f64, f64); 36] = [
        (15.0, 30.0, 30.0),
        (20.0, 30.0, 30.0),
        (25.0, 30.0, 30.0),
        (30.0, 30.0, 30.0),
        (35.0, 60.0, 60.0),
        (40.0, 60.0, 60.0),
        (45.0, 60.0, 60.0),
        (50.0, 60.0, 60.0),
        (60.0, 60.0, 60.0),
        (70.0, 100.0, 100.0),
        (80.0, 100.0, 100.0),
        (90.0, 100.0, 100.0),
        (100.0, 100.0, 100.0),
        (125.0, 200.0, 200.0),
        (150.0, 200.0, 200.0),
        (175.0, 200.0, 200.0),
        (200.0, 200.0, 200.0),
        (225.0, 225.0, 400.0),
        (250.0, 250.0, 400.0),
        (300.0, 400.0, 400.0),
        (350.0, 400.0, 400.0),
        (400.0, 400.0, 400.0),
        (450.0, 600.0, 600.0),
        (500.0, 600.0, 600.0),
        (600.0, 600.0, 600.0),
        (700.0, 800.0, 800.0),
        (800.0, 800.0, 800.0),
        (1000.0, 1000.0, 1000.0),
        (1200.0, 1200.0, 1200.0),
        (1600.0, 1600.0, 1600.0),
        (2000.0, 2000.0, 2000.0),
        (2500.0, 2500.0, 2500.0),
        (3000.0, 3000.0, 3000.0),
        (4000.0, 4000.0, 4000.0),
        (5000.0, 5000.0, 5000.0),
        (6000.0, 6000.0, 6000.0),
    ];
    ROWS.iter()
        .map(|&(amps, frame, switch)| StandardOcp {
            amps,
            frame,
            switch,
        })
        .collect()
}

pub(super) fn allowed_wire_sizes() -> Vec<WireSize> {
    vec![
        Awg12, Awg10, Awg8, Awg6, Awg4, Awg3, Awg2, Awg1, Awg1_0, Awg2_0, Awg3_0, Awg4_0,
        Kcmil250, Kcmil300, Kcmil350, Kcmil400, Kcmil500, Kcmil600, Kcmil700, Kcmil750, Kcmil800,
        Kcmil1000,
    ]
}

/// Default copper THWN-2 in EMT for every standard rating.
pub(super) fn ocp_defaults() -> BTreeMap<u32, WireInfo> {
    // (rating, hot, ground, sets, max lug size, max lug qty)
    const ROWS: [(u32, WireSize, Option<WireSize>, u32, WireSize, u32); 36] = [
        (15, Awg12, None, 1, Awg4, 1),
        (20, Awg12, None, 1, Awg4, 1),
        (25, Awg10, None, 1, Awg4, 1),
        (30, Awg10, None, 1, Awg4, 1),
        (35, Awg8, None, 1, Awg2, 1),
        (40, Awg8, None, 1, Awg2, 1),
        (45, Awg6, None, 1, Awg2, 1),
        (50, Awg6, None, 1, Awg2, 1),
        (60, Awg6, None, 1, Awg1_0, 1),
        (70, Awg4, None, 1, Awg1_0, 1),
        (80, Awg4, None, 1, Awg1_0, 1),
        (90, Awg3, None, 1, Awg1_0, 1),
        (100, Awg3, None, 1, Awg3_0, 1),
        (125, Awg1, None, 1, Awg4_0, 1),
        (150, Awg1_0, None, 1, Awg4_0, 1),
        (175, Awg2_0, None, 1, Kcmil300, 1),
        (200, Awg3_0, None, 1, Kcmil300, 1),
        (225, Awg4_0, None, 1, Kcmil350, 1),
        (250, Kcmil250, None, 1, Kcmil350, 2),
        (300, Kcmil350, None, 1, Kcmil500, 2),
        (350, Kcmil500, None, 1, Kcmil500, 2),
        (400, Awg3_0, Some(Awg3), 2, Kcmil500, 2),
        (450, Awg4_0, Some(Awg2), 2, Kcmil500, 2),
        (500, Kcmil250, Some(Awg2), 2, Kcmil500, 2),
        (600, Kcmil350, Some(Awg1), 2, Kcmil500, 3),
        (700, Kcmil500, Some(Awg1_0), 2, Kcmil600, 3),
        (800, Kcmil300, Some(Awg1_0), 3, Kcmil600, 3),
        (1000, Kcmil400, Some(Awg2_0), 3, Kcmil750, 4),
        (1200, Kcmil350, Some(Awg3_0), 4, Kcmil750, 4),
        (1600, Kcmil400, Some(Awg4_0), 5, Kcmil750, 6),
        (2000, Kcmil400, Some(Kcmil250), 6, Kcmil750, 6),
        (2500, Kcmil500, Some(Kcmil350), 7, Kcmil750, 8),
        (3000, Kcmil500, Some(Kcmil400), 8, Kcmil750, 10),
        (4000, Kcmil500, Some(Kcmil500), 11, Kcmil750, 12),
        (5000, Kcmil600, Some(Kcmil700), 13, Kcmil750, 14),
        (6000, Kcmil600, Some(Kcmil800), 15, Kcmil750, 16),
    ];

    ROWS.iter()
        .map(|&(rating, hot, ground, sets, lug_size, lug_qty)| {
            let info = WireInfo {
                wire_material: Material::Copper,
                wire_temperature_rating: TempRating::C75,
                wire_insulation: Some("THWN-2".to_string()),
                wire_hot_size: Some(hot),
                wire_ground_size: ground,
                number_of_parallel_sets: sets,
                max_lug_size: Some(lug_size),
                max_lug_qty: lug_qty,
                max_feeder_size: (rating >= 250).then_some(Kcmil500),
                conduit_type: Some("EMT".to_string()),
            };
            (rating, info)
        })
        .collect()
}
