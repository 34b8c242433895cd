use convoy_api::candidate;
use convoy_api::dispatch::Dispatch;
use convoy_api::error::ConvertError;
use convoy_api::key::TypeKey;
use convoy_api::provider::StaticProvider;
use convoy_engine::bound::BoundRegistry;
use convoy_engine::direct::DirectRegistry;
use convoy_engine::table::TableRegistry;
use convoy_people::{provider, Student, StudentDto, Teacher, TeacherDto};

fn ann() -> Student {
    Student {
        name: "Ann".to_string(),
    }
}

fn bo() -> Teacher {
    Teacher {
        name: "Bo".to_string(),
    }
}

#[test]
fn test_every_strategy_matches_the_direct_method_call() {
    let direct = DirectRegistry::new(provider());
    let table = TableRegistry::new(provider());
    let bound = BoundRegistry::new(provider());

    let expected = ann().to_dto();
    assert_eq!(
        direct.convert::<StudentDto, Student>(ann()).unwrap(),
        expected
    );
    assert_eq!(
        table.convert::<StudentDto, Student>(ann()).unwrap(),
        expected
    );
    assert_eq!(
        bound.convert::<StudentDto, Student>(ann()).unwrap(),
        expected
    );

    let expected = bo().to_dto();
    assert_eq!(
        direct.convert::<TeacherDto, Teacher>(bo()).unwrap(),
        expected
    );
    assert_eq!(
        table.convert::<TeacherDto, Teacher>(bo()).unwrap(),
        expected
    );
    assert_eq!(
        bound.convert::<TeacherDto, Teacher>(bo()).unwrap(),
        expected
    );
}

#[test]
fn test_discovery_cost_depends_on_the_strategy() {
    let direct = DirectRegistry::new(provider());
    let table = TableRegistry::new(provider());
    let bound = BoundRegistry::new(provider());

    for _ in 0..3 {
        let _ = direct.convert::<StudentDto, Student>(ann()).unwrap();
        let _ = table.convert::<StudentDto, Student>(ann()).unwrap();
        let _ = bound.convert::<StudentDto, Student>(ann()).unwrap();
        let _ = bound.convert::<TeacherDto, Teacher>(bo()).unwrap();
    }

    assert_eq!(direct.discovery_runs(), 3);
    assert_eq!(table.discovery_runs(), 1);
    // One pass per input type.
    assert_eq!(bound.discovery_runs(), 2);
}

#[test]
fn test_missing_pair_names_both_types() {
    let table = TableRegistry::new(provider());
    let err = table.convert::<TeacherDto, Student>(ann()).unwrap_err();
    assert_eq!(err, ConvertError::not_registered::<Student, TeacherDto>());
    let message = err.to_string();
    assert!(message.contains("Student"));
    assert!(message.contains("TeacherDto"));
}

#[test]
fn test_bound_cache_reports_the_mismatch_only_when_warm() {
    let bound = BoundRegistry::new(provider());

    // Cold: nothing is bound for Student yet.
    let err = bound.convert::<TeacherDto, Student>(ann()).unwrap_err();
    assert_eq!(err, ConvertError::not_registered::<Student, TeacherDto>());

    // Warm the Student slot, then ask for the other output.
    let _ = bound.convert::<StudentDto, Student>(ann()).unwrap();
    let err = bound.convert::<TeacherDto, Student>(ann()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::output_mismatch(
            TypeKey::of::<Student>(),
            TypeKey::of::<StudentDto>(),
            TypeKey::of::<TeacherDto>(),
        )
    );

    // The pair-keyed strategy never develops the caveat.
    let table = TableRegistry::new(provider());
    let _ = table.convert::<StudentDto, Student>(ann()).unwrap();
    let err = table.convert::<TeacherDto, Student>(ann()).unwrap_err();
    assert_eq!(err, ConvertError::not_registered::<Student, TeacherDto>());
}

#[test]
fn test_reset_returns_the_bound_cache_to_cold() {
    let bound = BoundRegistry::new(provider());
    let _ = bound.convert::<StudentDto, Student>(ann()).unwrap();
    bound.reset();
    assert_eq!(bound.discovery_runs(), 0);
    let err = bound.convert::<TeacherDto, Student>(ann()).unwrap_err();
    assert_eq!(err, ConvertError::not_registered::<Student, TeacherDto>());
}

#[test]
fn test_double_registration_is_ambiguous_and_lists_both_labels() {
    let doubled = provider().with(candidate!(Student::to_dto));
    let direct = DirectRegistry::new(doubled);
    let err = direct.convert::<StudentDto, Student>(ann()).unwrap_err();
    match err {
        ConvertError::Ambiguous { first, second, .. } => {
            assert!(first.contains("Student::to_dto"));
            assert!(second.contains("Student::to_dto"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_provider_has_no_candidates() {
    let direct = DirectRegistry::new(StaticProvider::new());
    let err = direct.convert::<StudentDto, Student>(ann()).unwrap_err();
    assert_eq!(err, ConvertError::NoCandidates);
    assert_eq!(err.to_string(), "no conversion candidates were discovered");
}
