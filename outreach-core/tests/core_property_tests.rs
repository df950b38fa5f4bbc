//! Property tests for the pagination window, filters, selection and the
//! automation wizard.

use outreach_core::{
    page_window, AutomationWizard, CompanyFilter, EntityId, ItemFilter, MessageFilter, PageSlot,
    Selection, MAX_WINDOW,
};
use outreach_test_utils::generators::*;
use proptest::prelude::*;

fn numbers(slots: &[PageSlot]) -> Vec<u32> {
    slots
        .iter()
        .filter_map(|slot| match slot {
            PageSlot::Number(n) => Some(*n),
            PageSlot::Ellipsis => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_window_is_bounded(current in 0u32..300, total in 0u32..300) {
        let slots = page_window(current, total);
        let nums = numbers(&slots);
        let ellipses = slots.len() - nums.len();

        prop_assert!(nums.len() <= MAX_WINDOW as usize);
        prop_assert!(ellipses <= 2);
        prop_assert!(nums.iter().all(|n| *n >= 1 && *n <= total));
        prop_assert!(nums.windows(2).all(|w| w[0] < w[1]));
        if total > MAX_WINDOW {
            prop_assert_eq!(nums.first().copied(), Some(1));
            prop_assert_eq!(nums.last().copied(), Some(total));
            prop_assert!(nums.contains(&current.clamp(1, total)));
        } else {
            prop_assert_eq!(nums, (1..=total).collect::<Vec<_>>());
        }
    }

    #[test]
    fn prop_ellipsis_marks_a_real_gap(current in 1u32..100, total in 6u32..100) {
        let slots = page_window(current, total);
        for (i, slot) in slots.iter().enumerate() {
            if *slot == PageSlot::Ellipsis {
                match (slots[i - 1], slots[i + 1]) {
                    (PageSlot::Number(a), PageSlot::Number(b)) => prop_assert!(b > a + 1),
                    other => prop_assert!(false, "ellipsis not between numbers: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn prop_industry_filter_returns_exact_subset(
        companies in arb_companies(12),
        industry in arb_industry(),
    ) {
        let filter = CompanyFilter::default().industry(industry.clone());
        let kept: Vec<EntityId> = filter.apply(&companies).iter().map(|c| c.id).collect();
        let expected: Vec<EntityId> = companies
            .iter()
            .filter(|c| c.industry == industry)
            .map(|c| c.id)
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_combined_filter_is_intersection(
        companies in arb_companies(12),
        a in arb_company_filter(),
        b in arb_company_filter(),
    ) {
        let combined = CompanyFilter {
            industry: a.industry.clone(),
            country: b.country.clone(),
            created_from: a.created_from,
            created_to: b.created_to,
            replies: a.replies,
        };
        let left = CompanyFilter {
            country: None,
            created_to: None,
            ..a.clone()
        };
        let right = CompanyFilter {
            industry: None,
            created_from: None,
            replies: Default::default(),
            ..b.clone()
        };
        for company in &companies {
            prop_assert_eq!(
                combined.matches(company),
                left.matches(company) && right.matches(company)
            );
        }
    }

    #[test]
    fn prop_message_filter_fields_intersect(
        messages in arb_messages(12),
        filter in arb_message_filter(),
    ) {
        for message in &messages {
            let by_type = MessageFilter { message_type: filter.message_type, ..Default::default() };
            let by_status = MessageFilter { status: filter.status, ..Default::default() };
            let by_stage = MessageFilter { stage: filter.stage, ..Default::default() };
            prop_assert_eq!(
                filter.matches(message),
                by_type.matches(message) && by_status.matches(message) && by_stage.matches(message)
            );
        }
    }

    #[test]
    fn prop_select_all_then_deselect_one(n in 1i64..40, pick in any::<prop::sample::Index>()) {
        let ids: Vec<EntityId> = (1..=n).collect();
        let removed = ids[pick.index(ids.len())];
        let mut selection = Selection::new();
        selection.select_all(ids.iter().copied());
        selection.toggle(removed);

        let expected: Vec<EntityId> = ids.into_iter().filter(|id| *id != removed).collect();
        prop_assert_eq!(selection.ids(), expected);
    }

    #[test]
    fn prop_toggle_twice_is_identity(
        initial in prop::collection::btree_set(1i64..50, 0..20),
        id in 1i64..50,
    ) {
        let mut selection = Selection::new();
        selection.select_all(initial.iter().copied());
        let before = selection.clone();
        selection.toggle(id);
        selection.toggle(id);
        prop_assert_eq!(selection, before);
    }

    #[test]
    fn prop_wizard_estimates(daily_limit in 1i64..=100, duration in 1i64..=60) {
        let mut wizard = AutomationWizard::new();
        wizard.daily_limit = daily_limit;
        wizard.run_duration_days = duration;
        let estimate = wizard.estimates();
        prop_assert_eq!(estimate.companies, daily_limit * duration);
        prop_assert_eq!(estimate.messages, daily_limit * duration * 6);
    }
}

#[test]
fn test_wizard_review_estimates_for_ten_a_day_over_a_week() {
    let mut wizard = AutomationWizard::new();
    wizard.industry = "Technology".to_string();
    wizard.country = "USA".to_string();
    wizard.daily_limit = 10;
    wizard.run_duration_days = 7;
    wizard.next().unwrap();
    wizard.next().unwrap();

    let estimate = wizard.estimates();
    assert_eq!(estimate.companies, 70);
    assert_eq!(estimate.messages, 420);
}
