use crate::{
    animation::{
        curve::{Curve, CurveChain},
        ease::Ease,
        param::Param,
    },
    color::recolor::{Recolor, SparkleFunc},
    foundation::error::TinselResult,
    pattern::pattern::Pattern,
    shading::{
        base_color::{BaseColor, Effects, FallingColor, PlainColor, StrategyList},
        topology::Topology,
    },
    streamers::{
        source::{StreamerSource, StreamerSpec},
        streamer::{Direction, Spin, StreamerFunc},
    },
};

const BOTH_SPINS: [Spin; 2] = [Spin::Clockwise, Spin::CounterClockwise];
const BOTH_DIRS: [Direction; 2] = [Direction::FromBottom, Direction::FromTop];

fn curve<const N: usize>(ease: Ease, points: [(f64, f64); N]) -> TinselResult<Curve> {
    Curve::new(ease, points)
}

fn hold<const N: usize>(points: [(f64, f64); N]) -> TinselResult<Curve> {
    Curve::new(Ease::Hold, points)
}

/// Every built-in pattern, in display order.
pub fn builtin_catalog() -> TinselResult<Vec<Pattern>> {
    Ok(vec![
        basic_glow()?,
        circus_tent()?,
        coiled_spring()?,
        confetti()?,
        falling_snow()?,
        galaxus()?,
        groovy()?,
        rainbro()?,
        sliding_door()?,
        spiral_top()?,
        turning_windows()?,
        twisted_rainbows()?,
    ])
}

fn basic_glow() -> TinselResult<Pattern> {
    Pattern::builder("Basic Glow")
        .base_color(BaseColor::lit(0.0))
        .build()
}

fn circus_tent() -> TinselResult<Pattern> {
    let rainbow = 1.0;
    let hue = |q: f64| rainbow * q;
    let dark = |q: f64| -> Option<BaseColor> {
        Some(PlainColor::default().with_hue(hue(q)).into())
    };
    let lit = |q: f64| -> Option<BaseColor> {
        Some(
            PlainColor::default()
                .with_hue(hue(q))
                .with_lightness(0.0)
                .suppressing(Effects::SPARKLES)
                .into(),
        )
    };
    let frames = vec![
        vec![dark(0.25), lit(0.0), dark(0.75), lit(0.5)],
        vec![lit(0.25), lit(0.0), lit(0.75), lit(0.5)],
        vec![lit(0.25), dark(0.0), lit(0.75), dark(0.5)],
        vec![lit(0.25), lit(0.0), lit(0.75), lit(0.5)],
    ];

    let groups = BOTH_DIRS
        .into_iter()
        .map(|dir| {
            BOTH_SPINS
                .into_iter()
                .map(|spin| -> TinselResult<StreamerSpec> {
                    Ok(StreamerSpec::new(dir, spin)
                        .with_spin(hold([(0.0, 1.0), (3.0, 0.5), (6.0, 1.0)])?)
                        .with_width(hold([(0.0, 0.1), (3.0, 0.15), (6.0, 0.1)])?)
                        .with_func(Recolor::whiten()))
                })
                .collect::<TinselResult<Vec<_>>>()
        })
        .collect::<TinselResult<Vec<_>>>()?;

    Pattern::builder("Circus Tent")
        .base_color(BaseColor::split(
            4.0,
            Some(StrategyList::Periodic {
                interval: 1.5,
                choices: frames,
            }),
        ))
        .topology(Topology::repeat(3.0))
        .sparkles(0.5)
        .streamers(StreamerSource::choices(3.0, groups))
        .build()
}

fn coiled_spring() -> TinselResult<Pattern> {
    let (rainbow, repeats, split, width, spirals) = (1.0, 3_u32, 0.25, 0.1, 2.0);
    let spiral = curve(
        Ease::OutBounce,
        [(0.0, spirals), (15.0, -spirals), (30.0, spirals)],
    )?;
    let n = f64::from(repeats);

    let groups: Vec<Vec<StreamerSpec>> = (0..4)
        .map(|o| {
            (0..repeats)
                .map(|i| {
                    let i = f64::from(i);
                    StreamerSpec::new(Direction::FromBottom, Spin::Clockwise)
                        .with_angle(i / n + f64::from(o) / (n * 4.0))
                        .with_spin(spiral.clone())
                        .with_length(2.0)
                        .with_width(width / n)
                        .with_lifetime(2.0)
                        .with_func(
                            Recolor::noop()
                                .with_hue(i * rainbow / 4.0)
                                .with_white(0.0)
                                .with_saturation(1.0)
                                .with_lightness(0.0),
                        )
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Pattern::builder("Coiled Spring")
        .base_color(BaseColor::window(
            1.0 - split,
            Some(StrategyList::Fixed(vec![
                Some(
                    PlainColor::default()
                        .with_white(0.75)
                        .with_saturation(0.0)
                        .with_lightness(-0.75)
                        .suppressing(Effects::SPARKLES | Effects::STREAMERS)
                        .into(),
                ),
                Some(BaseColor::default()),
            ])),
        ))
        .topology(Topology::repeat(n))
        .spiral(spiral)
        .streamers(StreamerSource::choices(2.0, groups))
        .build()
}

fn confetti() -> TinselResult<Pattern> {
    let rainbow = 1.0;
    let mut group = Vec::new();
    for spin in BOTH_SPINS {
        for (rate, width) in [(0.5, 0.1), (1.0, 0.15), (1.5, 0.2)] {
            for _ in 0..4 {
                group.push(
                    StreamerSpec::new(Direction::FromTop, spin)
                        .with_spin(rate)
                        .with_width(width)
                        .with_length(Param::Choice(vec![0.25, 0.5]))
                        .with_lifetime(Param::random(3.0, 6.0))
                        .with_func(StreamerFunc::RandomHue {
                            min: Param::Const(-rainbow / 2.0),
                            max: Param::Const(rainbow / 2.0),
                            white: Some(Param::Const(0.0)),
                            saturation: Some(Param::Const(1.0)),
                            lightness: Some(Param::Const(0.0)),
                        }),
                );
            }
        }
    }

    Pattern::builder("Confetti")
        .streamers(StreamerSource::choices(0.25, vec![group]).choosing(0, 2))
        .build()
}

fn falling_snow() -> TinselResult<Pattern> {
    let colors = 8;
    Pattern::builder("Falling Snow")
        .base_color(FallingColor::new(colors, colors / 2 - 1))
        .flitter(0.25)
        .flux(1.0 / 8.0)
        .sparkles(curve(
            Ease::InOutSine,
            [(0.0, 0.25), (6.0, 0.5), (12.0, 0.25)],
        )?)
        .build()
}

fn galaxus() -> TinselResult<Pattern> {
    let (speed, spins, spirals, width, wobble) = (2.0, 3_u32, 6_u32, 0.1, 0.25);
    let n = f64::from(spirals);
    let funcs = [
        Recolor::noop().with_lightness(0.0).with_hue(curve(
            Ease::InOutSine,
            [(0.0, 0.0), (7.5, -wobble), (15.0, 0.0), (22.5, wobble), (30.0, 0.0)],
        )?),
        Recolor::noop().with_lightness(0.0).with_hue(curve(
            Ease::InOutSine,
            [
                (0.0, 0.5),
                (5.0, 0.5 - wobble),
                (10.0, 0.5),
                (15.0, 0.5 + wobble),
                (20.0, 0.5),
            ],
        )?),
    ];
    let arms = [
        (Direction::FromBottom, Spin::Clockwise, 0.0),
        (Direction::FromTop, Spin::CounterClockwise, 0.5 / n),
    ];

    let mut sources = Vec::new();
    for ((dir, spin, offset), func) in arms.into_iter().zip(funcs) {
        let groups: Vec<Vec<StreamerSpec>> = (0..spins)
            .map(|o| {
                (0..spirals)
                    .map(|i| {
                        StreamerSpec::new(dir, spin)
                            .with_angle(
                                offset + f64::from(i) / n + f64::from(o) / (n * f64::from(spins)),
                            )
                            .with_spin(0.5)
                            .with_length(1.0)
                            .with_width(width / n)
                            .with_lifetime(speed * 1.5)
                            .with_func(func.clone())
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        sources.push(StreamerSource::choices(speed, groups));
    }
    if let Some(second) = sources.pop() {
        sources.push(second.offset_by(speed / 2.0));
    }

    Pattern::builder("Galaxus")
        .sparkles(0.25)
        .sparkle_func(SparkleFunc::WhitenIfOff)
        .streamers(StreamerSource::Combined(sources))
        .build()
}

fn groovy() -> TinselResult<Pattern> {
    let (rainbow, distortion, mid_distortion, mirrors) = (1.0 / 8.0, 0.5, 0.5, 2.0);
    let band = |hue: Param| -> Option<BaseColor> {
        Some(
            PlainColor::default()
                .with_hue(hue)
                .with_lightness(0.0)
                .without_spread()
                .suppressing(Effects::SPARKLES)
                .into(),
        )
    };
    let slots = vec![
        band(curve(Ease::InOutSine, [(0.0, rainbow), (15.0, 0.0), (30.0, rainbow)])?.into()),
        Some(BaseColor::default()),
        Some(BaseColor::default()),
        band(Param::Const(0.0)),
        band(Param::Const(0.0)),
        Some(BaseColor::default()),
        Some(BaseColor::default()),
        band(curve(Ease::InOutSine, [(0.0, -rainbow), (10.0, 0.0), (20.0, -rainbow)])?.into()),
    ];

    Pattern::builder("Groovy")
        .base_color(BaseColor::split(8.0, Some(StrategyList::Fixed(slots))))
        .topology(Topology::distort(
            Ease::InOutSine,
            curve(
                Ease::InOutSine,
                [(0.0, distortion), (30.0, -distortion), (60.0, distortion)],
            )?,
            curve(
                Ease::InOutSine,
                [(0.0, -distortion), (30.0, distortion), (60.0, -distortion)],
            )?,
            curve(
                Ease::InOutSine,
                [
                    (0.0, 0.5),
                    (5.0, 0.5 - 0.5 * mid_distortion),
                    (10.0, 0.5),
                    (15.0, 0.5 + 0.5 * mid_distortion),
                    (20.0, 0.5),
                ],
            )?,
        ))
        .topology(Topology::mirror(mirrors))
        .sparkles(0.25)
        .build()
}

fn rainbro() -> TinselResult<Pattern> {
    let (spirals, rainbow) = (2.0, 1.0);
    Pattern::builder("Rainbro")
        .base_color(BaseColor::lit(0.0))
        .topology(Topology::repeat(hold([
            (0.0, 6.0),
            (7.5, 8.0),
            (22.5, 4.0),
            (37.5, 2.0),
            (52.5, 3.0),
            (60.0, 6.0),
        ])?))
        .flitter(0.1)
        .flux(1.0 / 16.0)
        .spin(6.0)
        .spiral(curve(
            Ease::InOutSine,
            [(0.0, -spirals), (7.5, spirals), (15.0, -spirals)],
        )?)
        .spread(curve(
            Ease::InOutSine,
            [(0.0, rainbow), (15.0, -rainbow), (30.0, rainbow)],
        )?)
        .build()
}

fn sliding_door() -> TinselResult<Pattern> {
    let (rainbow, speed) = (0.0, 1.0);
    let door = PlainColor::default()
        .with_hue(hold([
            (0.0, rainbow / 2.0),
            (30.0 / speed, -rainbow / 2.0),
            (60.0 / speed, rainbow / 2.0),
        ])?)
        .with_lightness(0.0)
        .without_spread()
        .suppressing(Effects::SPARKLES | Effects::STREAMERS);

    let funcs = [
        Recolor::noop().with_hue(0.25).with_lightness(0.0).whitening(),
        Recolor::noop().with_hue(-0.25).with_lightness(0.75).whitening(),
    ];
    let mut sources = Vec::new();
    for func in funcs {
        let groups = BOTH_DIRS
            .into_iter()
            .map(|dir| {
                BOTH_SPINS
                    .into_iter()
                    .map(|spin| -> TinselResult<StreamerSpec> {
                        Ok(StreamerSpec::new(dir, spin)
                            .with_spin(hold([(0.0, 1.0), (6.0, 0.5), (12.0, 1.0)])?)
                            .with_width(hold([(0.0, 0.1), (6.0, 0.15), (12.0, 0.1)])?)
                            .with_func(func.clone()))
                    })
                    .collect::<TinselResult<Vec<_>>>()
            })
            .collect::<TinselResult<Vec<_>>>()?;
        sources.push(StreamerSource::choices(3.0, groups));
    }

    Pattern::builder("Sliding Door")
        .base_color(BaseColor::window(
            curve(
                Ease::InOutSine,
                [(0.0, 0.0), (15.0 / speed, 1.0), (30.0 / speed, 0.0)],
            )?,
            Some(StrategyList::Fixed(vec![
                Some(PlainColor::default().without_spread().into()),
                Some(door.into()),
            ])),
        ))
        .topology(Topology::mirror(hold([
            (0.0, 4.0),
            (6.0, 3.0),
            (12.0, 6.0),
            (18.0, 2.0),
            (24.0, 5.0),
            (30.0, 4.0),
        ])?))
        .flux(1.0 / 16.0)
        .spread(curve(
            Ease::InOutSine,
            [(0.0, rainbow / 2.0), (15.0, -rainbow / 2.0), (30.0, rainbow / 2.0)],
        )?)
        .sparkles(0.5)
        .streamers(StreamerSource::Combined(sources))
        .build()
}

fn spiral_top() -> TinselResult<Pattern> {
    let (mirror, speed, spirals) = (2.0, 1.0, 1.0);
    Pattern::builder("Spiral Top")
        .base_color(BaseColor::window(
            curve(Ease::Linear, [(0.0, 0.0), (15.0 / speed, 1.0)])?,
            None,
        ))
        .topology(Topology::mirror(mirror))
        .flux(1.0 / 16.0)
        .spin(curve(
            Ease::InSine,
            [(0.0, 0.0), (15.0, 2.0), (30.0, 0.0), (45.0, -2.0), (60.0, 0.0)],
        )?)
        .spiral(curve(
            Ease::InOutSine,
            [
                (0.0, 0.0),
                (15.0 / speed, spirals),
                (30.0 / speed, 0.0),
                (45.0 / speed, -spirals),
                (60.0 / speed, 0.0),
            ],
        )?)
        .spread(1.0 / 3.0)
        .sparkles(0.15)
        .build()
}

fn turning_windows() -> TinselResult<Pattern> {
    let (delay, splits, repeats, rainbow) = (0.25, 8_usize, 4.0, 1.0);
    let windows: Vec<Vec<Option<BaseColor>>> = (0..splits)
        .map(|i| {
            (0..splits)
                .map(|j| (i == j).then(BaseColor::default))
                .collect::<Vec<_>>()
        })
        .collect();
    let turn = CurveChain::new(vec![
        curve(Ease::OutSine, [(0.0, 0.0), (15.0, 1.0)])?,
        curve(Ease::OutSine, [(0.0, 0.0), (15.0, -1.0)])?,
    ])?;

    Pattern::builder("Turning Windows")
        .base_color(BaseColor::Split {
            count: Param::Const(splits as f64),
            slots: Some(StrategyList::Periodic {
                interval: delay,
                choices: windows,
            }),
            suppress: Effects::SPARKLES,
        })
        .topology(Topology::repeat(repeats))
        .topology(Topology::turnt(repeats, turn))
        .spread(curve(
            Ease::Linear,
            [
                (0.0, 0.0),
                (15.0, rainbow),
                (30.0, 0.0),
                (45.0, rainbow),
                (60.0, 0.0),
            ],
        )?)
        .build()
}

fn twisted_rainbows() -> TinselResult<Pattern> {
    let (rainbow, splits) = (1.0, 3.0);
    let group: Vec<StreamerSpec> = BOTH_DIRS
        .into_iter()
        .flat_map(|dir| BOTH_SPINS.into_iter().map(move |spin| (dir, spin)))
        .map(|(dir, spin)| {
            StreamerSpec::new(dir, spin)
                .with_spin(2.0)
                .with_length(2.0)
                .with_width(0.15)
                .with_lifetime(3.0)
                .with_func(Recolor::whiten())
        })
        .collect();

    Pattern::builder("Twisted Rainbows")
        .base_color(BaseColor::split(splits, None))
        .topology(Topology::repeat(hold([
            (0.0, 1.0),
            (12.0, 3.0),
            (24.0, 5.0),
            (36.0, 4.0),
            (48.0, 2.0),
            (60.0, 1.0),
        ])?))
        .spread(curve(
            Ease::InOutCubic,
            [
                (0.0, rainbow / 2.0),
                (3.0, 0.0),
                (6.0, -rainbow / 2.0),
                (9.0, 0.0),
                (12.0, rainbow / 2.0),
            ],
        )?)
        .spiral(hold([
            (0.0, -3.0),
            (3.0, 3.0),
            (9.0, -1.5),
            (15.0, 1.5),
            (21.0, -0.5),
            (27.0, 0.5),
            (33.0, -1.0),
            (39.0, 1.0),
            (45.0, -2.0),
            (51.0, 2.0),
            (57.0, -3.0),
            (60.0, -3.0),
        ])?)
        .streamers(StreamerSource::choices(1.0, vec![group]).choosing(0, 2))
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/catalog.rs"]
mod tests;
