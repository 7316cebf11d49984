use testhub_grid::LoadingCounter;

#[test]
fn test_nested_show_and_hide() {
    let mut loading = LoadingCounter::new();
    loading.show("users");
    loading.show("posts");
    assert_eq!(loading.count(), 2);
    assert_eq!(loading.content(), "posts");

    loading.hide();
    assert!(loading.is_showing());
    loading.hide();
    assert!(!loading.is_showing());
    assert_eq!(loading.count(), 0);
}

#[test]
fn test_extra_hide_is_ignored() {
    let mut loading = LoadingCounter::new();
    loading.hide();
    assert_eq!(loading.count(), 0);

    loading.show("once");
    loading.hide();
    loading.hide();
    loading.show("again");
    assert!(loading.is_showing());
    assert_eq!(loading.count(), 1);
}

#[test]
fn test_showing_next_reports_changes() {
    let mut loading = LoadingCounter::new();
    assert!(loading.set_showing_next(true));
    assert!(!loading.set_showing_next(true));
    assert!(loading.is_showing_next());
    assert!(loading.set_showing_next(false));
}
