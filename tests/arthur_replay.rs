
use _fixtures::{
    committed, values, BAD_PROTOCOL, BAD_PROTOCOL_PATTERN, BAD_PROTOCOL_TRANSCRIPT,
    GOLDILOCKS_CHALLENGES, GOLDILOCKS_CHALLENGE_BYTES, GOLDILOCKS_PATTERN, GOLDILOCKS_REPLIES,
    GOLDILOCKS_TAIL,
};
use rpp_arthur::arthur::{Blake2sArthur, Request};
use rpp_arthur::circuit::{ByteVar, ConstraintSystem, ScalarVar};
use rpp_arthur::field::FieldElement;
use rpp_arthur::sponge::{Blake2sChain, NativeSponge};
use rpp_arthur::{
    ArthurError, BufferExhaustionError, ConfigError, ConstructionError, IOPattern, Interaction,
    KeccakArthur, Op, OverflowPolicy, ParseError, ReplayConfig, ReplaySummary, ScalarCodec,
    ScalarRangeError, ScheduleMismatchError,
};

type Engine<'a> = KeccakArthur<'a, FieldElement>;

#[test]
fn squeeze_then_absorb_replays() {
    let pattern = IOPattern::parse(b"p\0S8c\0A8r").unwrap();
    let transcript = [10u8, 11, 12, 13, 14, 15, 16, 17];
    let (mut cs, commitment) = committed(&transcript);
    let mut arthur = Engine::new(&pattern, &transcript, &commitment, ReplayConfig::default()).unwrap();

    let mut challenge = [ByteVar::default(); 8];
    arthur.fill_challenge_bytes(&mut cs, &mut challenge).unwrap();
    assert_eq!((arthur.schedule_cursor(), arthur.buffer_cursor()), (1, 0));

    let mut reply = [ByteVar::default(); 8];
    arthur.fill_next_bytes(&mut cs, &mut reply).unwrap();
    assert_eq!((arthur.schedule_cursor(), arthur.buffer_cursor()), (2, 8));
    assert_eq!(values(&cs, &reply), transcript);

    assert_eq!(
        arthur.finish().unwrap(),
        ReplaySummary {
            interactions: 2,
            absorbed_bytes: 8,
            squeezed_bytes: 8,
            trailing_bytes: 0,
        }
    );
    assert!(cs.is_satisfied().is_ok());
    // one binding constraint per reply byte
    assert_eq!(cs.constraints(), 8);
}

#[test]
fn wrong_length_is_rejected_without_side_effects() {
    let pattern = IOPattern::parse(b"p\0S8c").unwrap();
    let (mut cs, commitment) = committed(&[]);
    let mut arthur = Engine::new(&pattern, &[], &commitment, ReplayConfig::default()).unwrap();

    let err = arthur.challenge_bytes(&mut cs, 16).unwrap_err();
    assert_eq!(
        err,
        ArthurError::ScheduleMismatch(ScheduleMismatchError {
            position: 0,
            expected: Some(Interaction::new(Op::Squeeze, 8, "c")),
            requested: Request {
                op: Op::Squeeze,
                length: 16
            },
        })
    );
    assert_eq!(arthur.schedule_cursor(), 0);
    assert_eq!(cs.num_bytes(), 0);

    let challenge = arthur.challenge_bytes(&mut cs, 8).unwrap();
    let mut fresh = Engine::new(&pattern, &[], &commitment, ReplayConfig::default()).unwrap();
    let (mut fresh_cs, _) = committed(&[]);
    let expected = fresh.challenge_bytes(&mut fresh_cs, 8).unwrap();
    assert_eq!(values(&cs, &challenge), values(&fresh_cs, &expected));
    assert!(arthur.is_exhausted());
}

#[test]
fn wrong_direction_is_rejected() {
    let transcript = [0u8; 8];
    let pattern = IOPattern::parse(b"p\0S8c\0A8r").unwrap();
    let (mut cs, commitment) = committed(&transcript);
    let mut arthur = Engine::new(&pattern, &transcript, &commitment, ReplayConfig::default()).unwrap();

    let err = arthur.next_bytes(&mut cs, 8).unwrap_err();
    assert!(matches!(
        err,
        ArthurError::ScheduleMismatch(ScheduleMismatchError {
            position: 0,
            requested: Request { op: Op::Absorb, length: 8 },
            ..
        })
    ));
    assert_eq!(arthur.buffer_cursor(), 0);
    assert_eq!(cs.constraints(), 0);
}

#[test]
fn exhausted_schedule_reports_no_expectation() {
    let pattern = IOPattern::parse(b"p\0S4c").unwrap();
    let (mut cs, commitment) = committed(&[]);
    let mut arthur = Engine::new(&pattern, &[], &commitment, ReplayConfig::default()).unwrap();
    arthur.challenge_bytes(&mut cs, 4).unwrap();

    let err = arthur.challenge_bytes(&mut cs, 4).unwrap_err();
    assert_eq!(
        err,
        ArthurError::ScheduleMismatch(ScheduleMismatchError {
            position: 1,
            expected: None,
            requested: Request {
                op: Op::Squeeze,
                length: 4
            },
        })
    );
    assert_eq!(arthur.next_interaction(), None);
}

#[test]
fn empty_request_never_matches() {
    let pattern = IOPattern::parse(b"p\0A1r").unwrap();
    let (mut cs, commitment) = committed(&[1]);
    let mut arthur = Engine::new(&pattern, &[1], &commitment, ReplayConfig::default()).unwrap();
    assert!(matches!(
        arthur.next_bytes(&mut cs, 0),
        Err(ArthurError::ScheduleMismatch(_))
    ));
}

#[test]
fn short_transcript_exhausts_buffer() {
    let pattern = IOPattern::parse(b"p\0A2head\0A8body").unwrap();
    let transcript = [1u8, 2, 3, 4, 5];
    let (mut cs, commitment) = committed(&transcript);
    let mut arthur = Engine::new(&pattern, &transcript, &commitment, ReplayConfig::default()).unwrap();
    arthur.next_bytes(&mut cs, 2).unwrap();

    let constraints = cs.constraints();
    let allocated = cs.num_bytes();
    let err = arthur.next_bytes(&mut cs, 8).unwrap_err();
    assert_eq!(
        err,
        ArthurError::BufferExhaustion(BufferExhaustionError {
            position: 1,
            offset: 2,
            requested: 8,
            remaining: 3,
        })
    );
    assert_eq!((arthur.schedule_cursor(), arthur.buffer_cursor()), (1, 2));
    assert_eq!((cs.constraints(), cs.num_bytes()), (constraints, allocated));
}

#[test]
fn bad_protocol_matches_native_prover() {
    let (mut cs, commitment) = committed(&BAD_PROTOCOL_TRANSCRIPT);
    let mut arthur = Engine::new(
        &BAD_PROTOCOL_PATTERN,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();

    let first = arthur.challenge_bytes(&mut cs, 8).unwrap();
    let first_reply = arthur.next_bytes(&mut cs, 8).unwrap();
    let second = arthur.challenge_bytes(&mut cs, 16).unwrap();
    let second_reply = arthur.next_bytes(&mut cs, 16).unwrap();

    // the prover echoes each challenge as its reply
    assert_eq!(values(&cs, &first), &BAD_PROTOCOL_TRANSCRIPT[..8]);
    assert_eq!(values(&cs, &second), &BAD_PROTOCOL_TRANSCRIPT[8..]);
    for (challenge, reply) in first.iter().chain(&second).zip(first_reply.iter().chain(&second_reply)) {
        cs.assert_equal_bytes(*challenge, *reply);
    }
    assert!(cs.is_satisfied().is_ok());
    assert!(arthur.finish().is_ok());
}

#[test]
fn tampered_public_transcript_is_unsatisfiable() {
    let (mut cs, commitment) = committed(&BAD_PROTOCOL_TRANSCRIPT);
    let mut arthur = Engine::new(
        &BAD_PROTOCOL_PATTERN,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    arthur.challenge_bytes(&mut cs, 8).unwrap();
    arthur.next_bytes(&mut cs, 8).unwrap();
    assert!(cs.is_satisfied().is_ok());

    cs.set_byte_witness(commitment[3], BAD_PROTOCOL_TRANSCRIPT[3] ^ 1);
    let err = cs.is_satisfied().unwrap_err();
    assert_eq!(err.kind, "equal bytes");
    assert_eq!(err.index, 3);
}

#[test]
fn engines_agree_until_transcripts_diverge() {
    let pattern = &*BAD_PROTOCOL_PATTERN;
    let honest = BAD_PROTOCOL_TRANSCRIPT;
    let mut forged = honest;
    forged[0] ^= 0x80;

    let (mut cs_a, commitment_a) = committed(&honest);
    let (mut cs_b, commitment_b) = committed(&forged);
    let mut a = Engine::new(pattern, &honest, &commitment_a, ReplayConfig::default()).unwrap();
    let mut b = Engine::new(pattern, &forged, &commitment_b, ReplayConfig::default()).unwrap();

    let first_a = a.challenge_bytes(&mut cs_a, 8).unwrap();
    let first_b = b.challenge_bytes(&mut cs_b, 8).unwrap();
    assert_eq!(values(&cs_a, &first_a), values(&cs_b, &first_b));

    a.next_bytes(&mut cs_a, 8).unwrap();
    b.next_bytes(&mut cs_b, 8).unwrap();
    let second_a = a.challenge_bytes(&mut cs_a, 16).unwrap();
    let second_b = b.challenge_bytes(&mut cs_b, 16).unwrap();
    assert_ne!(values(&cs_a, &second_a), values(&cs_b, &second_b));
}

#[test]
fn labels_are_part_of_the_seed() {
    let relabelled = IOPattern::parse(
        b"bad-protocol\0S8first challenge\0A8first reply\0S16second challenge\0A16other reply",
    )
    .unwrap();
    let (mut cs_a, commitment) = committed(&BAD_PROTOCOL_TRANSCRIPT);
    let mut cs_b = cs_a.clone();
    let mut a = Engine::new(
        &BAD_PROTOCOL_PATTERN,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    let mut b = Engine::new(
        &relabelled,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();

    let from_a = a.challenge_bytes(&mut cs_a, 8).unwrap();
    let from_b = b.challenge_bytes(&mut cs_b, 8).unwrap();
    assert_ne!(values(&cs_a, &from_a), values(&cs_b, &from_b));
}

#[test]
fn scalar_fills_follow_codec_layouts() {
    let (mut cs, commitment) = committed(&GOLDILOCKS_REPLIES);
    let mut arthur = Engine::new(
        &GOLDILOCKS_PATTERN,
        &GOLDILOCKS_REPLIES,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();

    let mut challenges = [ScalarVar::default(); 2];
    arthur.fill_challenge_scalars(&mut cs, &mut challenges).unwrap();
    let drawn: Vec<u64> = challenges
        .iter()
        .map(|var| cs.scalar_value(*var).as_u64())
        .collect();
    assert_eq!(drawn, GOLDILOCKS_CHALLENGES);

    let mut replies = [ScalarVar::default(); 2];
    arthur.fill_next_scalars(&mut cs, &mut replies).unwrap();
    assert_eq!(cs.scalar_value(replies[0]), FieldElement::ONE);
    assert_eq!(cs.scalar_value(replies[1]).as_u64(), 0xffff_fffe_ffff_ffff);

    let tail = arthur.challenge_bytes(&mut cs, 8).unwrap();
    assert_eq!(values(&cs, &tail), GOLDILOCKS_TAIL);
    assert!(cs.is_satisfied().is_ok());
    assert_eq!(arthur.finish().unwrap().squeezed_bytes, 56);
}

#[test]
fn challenge_scalars_pack_the_challenge_bytes() {
    let (mut cs, commitment) = committed(&GOLDILOCKS_REPLIES);
    let mut arthur = Engine::new(
        &GOLDILOCKS_PATTERN,
        &GOLDILOCKS_REPLIES,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    let bytes = arthur.challenge_bytes(&mut cs, 48).unwrap();
    assert_eq!(values(&cs, &bytes), GOLDILOCKS_CHALLENGE_BYTES);
}

#[test]
fn scalar_count_must_cover_interaction() {
    let (mut cs, commitment) = committed(&GOLDILOCKS_REPLIES);
    let mut arthur = Engine::new(
        &GOLDILOCKS_PATTERN,
        &GOLDILOCKS_REPLIES,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    let err = arthur.challenge_scalars(&mut cs, 3).unwrap_err();
    assert!(matches!(
        err,
        ArthurError::ScheduleMismatch(ScheduleMismatchError {
            requested: Request { op: Op::Squeeze, length: 72 },
            ..
        })
    ));
}

#[test]
fn non_canonical_reply_is_rejected_or_reduced() {
    let mut transcript = GOLDILOCKS_REPLIES;
    transcript[8..].copy_from_slice(&0xffff_ffff_0000_0001u64.to_le_bytes());
    let (mut cs, commitment) = committed(&transcript);

    let mut strict =
        Engine::new(&GOLDILOCKS_PATTERN, &transcript, &commitment, ReplayConfig::default()).unwrap();
    strict.challenge_scalars(&mut cs, 2).unwrap();
    let constraints = cs.constraints();
    let err = strict.next_scalars(&mut cs, 2).unwrap_err();
    assert_eq!(err, ArthurError::ScalarRange(ScalarRangeError::NonCanonical { width: 8 }));
    assert_eq!((strict.schedule_cursor(), strict.buffer_cursor()), (1, 0));
    assert_eq!(cs.constraints(), constraints);

    let config = ReplayConfig {
        reply_overflow: OverflowPolicy::Reduce,
        ..ReplayConfig::default()
    };
    let (mut cs, commitment) = committed(&transcript);
    let mut lenient = Engine::new(&GOLDILOCKS_PATTERN, &transcript, &commitment, config).unwrap();
    lenient.challenge_scalars(&mut cs, 2).unwrap();
    let replies = lenient.next_scalars(&mut cs, 2).unwrap();
    assert_eq!(cs.scalar_value(replies[1]), FieldElement::ZERO);
    assert!(cs.is_satisfied().is_ok());
}

#[test]
fn reply_width_override_changes_layout() {
    let pattern = IOPattern::parse(b"p\0A6r").unwrap();
    let transcript = [1u8, 0, 2, 0, 3, 0];
    let (mut cs, commitment) = committed(&transcript);
    let config = ReplayConfig {
        reply_width: Some(2),
        ..ReplayConfig::default()
    };
    let mut arthur = Engine::new(&pattern, &transcript, &commitment, config).unwrap();
    let replies = arthur.next_scalars(&mut cs, 3).unwrap();
    let decoded: Vec<u64> = replies
        .iter()
        .map(|var| cs.scalar_value(*var).as_u64())
        .collect();
    assert_eq!(decoded, vec![1, 2, 3]);
}

#[test]
fn finish_reports_unconsumed_interactions() {
    let (mut cs, commitment) = committed(&BAD_PROTOCOL_TRANSCRIPT);
    let mut arthur = Engine::new(
        &BAD_PROTOCOL_PATTERN,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    arthur.challenge_bytes(&mut cs, 8).unwrap();
    assert_eq!(arthur.remaining(), 3);
    assert_eq!(
        arthur.finish(),
        Err(ArthurError::Unconsumed {
            position: 1,
            remaining: 3
        })
    );

    let config = ReplayConfig {
        allow_unconsumed: true,
        ..ReplayConfig::default()
    };
    let (mut cs, commitment) = committed(&BAD_PROTOCOL_TRANSCRIPT);
    let mut partial =
        Engine::new(&BAD_PROTOCOL_PATTERN, &BAD_PROTOCOL_TRANSCRIPT, &commitment, config).unwrap();
    partial.challenge_bytes(&mut cs, 8).unwrap();
    partial.next_bytes(&mut cs, 8).unwrap();
    assert_eq!(
        partial.finish().unwrap(),
        ReplaySummary {
            interactions: 2,
            absorbed_bytes: 8,
            squeezed_bytes: 8,
            trailing_bytes: 16,
        }
    );
}

#[test]
fn construction_errors() {
    let (_, commitment) = committed(&[0; 4]);
    assert!(matches!(
        Engine::from_schedule(b"p\0Schallenge", &[0; 4], &commitment, ReplayConfig::default()),
        Err(ConstructionError::Parse(ParseError::MissingLength { field: 1 }))
    ));
    assert!(matches!(
        Engine::from_schedule(b"p\0Q8c", &[0; 4], &commitment, ReplayConfig::default()),
        Err(ConstructionError::Parse(ParseError::InvalidOp { field: 1, found: Some(b'Q') }))
    ));
    assert!(matches!(
        Engine::from_schedule(BAD_PROTOCOL, &[0; 3], &commitment, ReplayConfig::default()),
        Err(ConstructionError::CommitmentLength {
            transcript: 3,
            commitment: 4
        })
    ));
    let config = ReplayConfig {
        challenge_width: Some(0),
        ..ReplayConfig::default()
    };
    assert!(matches!(
        Engine::from_schedule(BAD_PROTOCOL, &[0; 4], &commitment, config),
        Err(ConstructionError::Config(ConfigError::ZeroWidth {
            field: "challenge_width"
        }))
    ));
}

#[test]
fn blake2s_engine_replays_the_same_schedule() {
    let (mut cs_a, commitment) = committed(&BAD_PROTOCOL_TRANSCRIPT);
    let mut cs_b = cs_a.clone();
    let mut keccak = Engine::new(
        &BAD_PROTOCOL_PATTERN,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    let mut blake = Blake2sArthur::<FieldElement>::new(
        &BAD_PROTOCOL_PATTERN,
        &BAD_PROTOCOL_TRANSCRIPT,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();

    let from_keccak = keccak.challenge_bytes(&mut cs_a, 8).unwrap();
    let from_blake = blake.challenge_bytes(&mut cs_b, 8).unwrap();
    assert_ne!(values(&cs_a, &from_keccak), values(&cs_b, &from_blake));

    blake.next_bytes(&mut cs_b, 8).unwrap();
    blake.challenge_bytes(&mut cs_b, 16).unwrap();
    blake.next_bytes(&mut cs_b, 16).unwrap();
    assert!(blake.is_exhausted());
    assert!(cs_b.is_satisfied().is_ok());
}

#[test]
fn challenge_scalars_squeeze_once_per_scalar() {
    let codec = ScalarCodec::challenge::<FieldElement>();
    let mut prover = Blake2sChain::from_pattern(&GOLDILOCKS_PATTERN);
    let expected: Vec<FieldElement> = (0..2)
        .map(|_| {
            let mut chunk = vec![0u8; codec.width];
            prover.squeeze(&mut chunk);
            codec.decode(&chunk).unwrap()
        })
        .collect();

    let (mut cs, commitment) = committed(&GOLDILOCKS_REPLIES);
    let mut arthur = Blake2sArthur::<FieldElement>::new(
        &GOLDILOCKS_PATTERN,
        &GOLDILOCKS_REPLIES,
        &commitment,
        ReplayConfig::default(),
    )
    .unwrap();
    let drawn: Vec<FieldElement> = arthur
        .challenge_scalars(&mut cs, 2)
        .unwrap()
        .iter()
        .map(|var| cs.scalar_value(*var))
        .collect();
    assert_eq!(drawn, expected);

    // the chain folds every squeeze back into its state, so one wide squeeze
    // yields a different second scalar
    let mut wide = vec![0u8; 2 * codec.width];
    Blake2sChain::from_pattern(&GOLDILOCKS_PATTERN).squeeze(&mut wide);
    assert_eq!(codec.decode::<FieldElement>(&wide[..codec.width]).unwrap(), expected[0]);
    assert_ne!(codec.decode::<FieldElement>(&wide[codec.width..]).unwrap(), expected[1]);
}
