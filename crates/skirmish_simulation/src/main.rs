//! Headless skirmish demo
//!
//! Runs a scripted sword swing against a training dummy without a renderer:
//! spawns a fighter, a blade attack point, and a dummy, then drives the
//! fixed-step schedule by hand and reports what connected.

use bevy::prelude::*;
use skirmish_simulation::*;

const DUMMY_LAYER: Layer = Layer(2);
const SURFACE_FLESH: SurfaceKind = SurfaceKind(1);

fn report_hits(mut dealt: EventReader<DamageDealt>, mut playback: EventReader<PlaybackCommand>) {
    for event in dealt.read() {
        println!(
            "HIT: {:?} -> {:?} for {} damage{}",
            event.attacker,
            event.target,
            event.damage,
            if event.target_died { " (killed)" } else { "" }
        );
    }
    for command in playback.read() {
        println!(
            "AUDIO: clip {:?} at pitch {:.3} (delay {:.2}s)",
            command.clip, command.pitch, command.delay
        );
    }
}

fn main() {
    let seed = DEFAULT_SEED;
    println!("Starting skirmish headless demo (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app.add_systems(FixedUpdate, report_hits.after(SimulationSet::Combat));

    let world = app.world_mut();

    // Audio players: one for swing sounds, one for contextual hit sounds
    let attack_audio = world
        .spawn(RandomAudioPlayer::new(SoundBank::new(
            "swings",
            vec![ClipId(100), ClipId(101)],
        )))
        .id();
    let hit_audio = world
        .spawn(
            RandomAudioPlayer::new(SoundBank::new("hits", vec![ClipId(200)])).with_overrides(
                vec![SurfaceAudioOverride {
                    surfaces: vec![SURFACE_FLESH],
                    banks: vec![SoundBank::new("flesh_hits", vec![ClipId(210), ClipId(211)])],
                }],
            ),
        )
        .id();

    // Fighter and blade. The blade transform is the moving frame the
    // attack point rides on; the demo animates it by hand.
    let fighter = world
        .spawn((
            Transform::from_xyz(0.0, 0.0, 0.0),
            Health::new(100),
            SphereCollider::solid(0.5, DUMMY_LAYER),
        ))
        .id();
    let blade = world.spawn(Transform::from_xyz(0.0, 1.0, 0.0)).id();

    let mut weapon = MeleeWeapon::new(10)
        .with_target_layers(LayerMask::single(DUMMY_LAYER))
        .with_attack_point(AttackPoint {
            radius: 0.3,
            offset: Vec3::ZERO,
            root: blade,
        })
        .with_hit_audio(hit_audio)
        .with_attack_audio(attack_audio)
        .with_hit_effects(HitEffectPool::new());
    weapon.set_owner(fighter);
    let weapon = world.spawn(weapon).id();

    // Training dummy, 2m in front of the fighter
    world.spawn((
        Transform::from_xyz(2.0, 1.0, 0.0),
        Health::new(30),
        SphereCollider::solid(0.5, DUMMY_LAYER),
        Surface(SURFACE_FLESH),
    ));

    // Scripted swing: begin, move the blade through the dummy over a few
    // ticks, end.
    world.send_event(AttackBegin {
        weapon,
        throwing: false,
    });

    for tick in 0..6 {
        let x = 0.5 * (tick + 1) as f32;
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(blade) {
            transform.translation.x = x;
        }
        app.world_mut().run_schedule(FixedUpdate);
    }

    app.world_mut().send_event(AttackEnd { weapon });
    app.world_mut().run_schedule(FixedUpdate);

    println!("Demo complete");
}
