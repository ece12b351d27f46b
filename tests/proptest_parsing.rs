use proptest::prelude::*;
use tasksolver::text_utils::{strip_code_fence, strip_data_url_prefix};
use tasksolver::Solution;

proptest! {
    #[test]
    fn prop_strip_code_fence_no_panic(s in "(?s).*") {
        let _ = strip_code_fence(&s);
    }

    #[test]
    fn prop_from_reply_always_has_shape(s in "(?s).*") {
        let solution = Solution::from_reply(&s);
        let value = serde_json::to_value(&solution).unwrap();
        for key in ["subject", "task", "steps", "answer"] {
            prop_assert!(value.get(key).is_some());
        }
    }

    #[test]
    fn prop_plain_words_fall_back_verbatim(s in "[a-zA-Zа-яА-Я ]{1,40}") {
        let solution = Solution::from_reply(&s);
        prop_assert_eq!(solution, Solution::fallback(s.trim()));
    }

    #[test]
    fn prop_data_url_keeps_payload(mime in "[a-z]+/[a-z]+", payload in "[A-Za-z0-9+/=]{0,64}") {
        let url = format!("data:{mime};base64,{payload}");
        prop_assert_eq!(strip_data_url_prefix(&url), payload.as_str());
    }
}
