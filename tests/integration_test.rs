use chrono::{Days, Local};
use promo_funnel::{
    AddressFlow, AddressLookup, AddressPhase, App, Config, Effect, FunnelError, FunnelSession,
    Intent, LookupError, Screen, ViaCepClient,
};
use promo_funnel::models::{AddressLookupResult, PostalCode};
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

/// 内存地址服务：只认识 01310-100
struct MemoryLookup;

impl AddressLookup for MemoryLookup {
    async fn lookup(&self, postal_code: &PostalCode) -> Result<AddressLookupResult, LookupError> {
        if postal_code.digits() == "01310100" {
            Ok(AddressLookupResult {
                postal_code: "01310-100".to_string(),
                street: "Avenida Paulista".to_string(),
                complement: "de 612 a 1510 - lado par".to_string(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                region: "SP".to_string(),
            })
        } else {
            Err(LookupError::NotFound {
                postal_code: postal_code.to_string(),
            })
        }
    }
}

fn answer_all(session: &mut FunnelSession) {
    while let Some(question) = session.current_question() {
        let label = question.options.last().unwrap().label.to_string();
        assert_ok!(session.apply(Intent::SelectOption(label)));
        assert_ok!(session.apply(Intent::Continue));
    }
}

fn intro(name: &str, email: &str) -> Intent {
    Intent::SubmitIntro {
        name: name.to_string(),
        email: email.to_string(),
    }
}

/// 场景 A：合法表单 → 答完六题 → 优惠页 Idle
#[test]
fn test_scenario_a_reaches_promotion() {
    let mut session = FunnelSession::new(&Config::default());
    assert_ok!(session.apply(intro("Maria Silva", "maria@example.com")));
    assert_eq!(session.current_step(), Some(1));
    assert!(session.answers().is_empty());

    answer_all(&mut session);

    assert_eq!(session.answers().len(), 6);
    assert_eq!(
        session.screen(),
        &Screen::Promotion {
            phase: AddressPhase::Idle {
                input: String::new(),
                not_found: false
            }
        }
    );
}

/// 场景 B（内存服务）：解析成功，报价冻结
#[tokio::test(start_paused = true)]
async fn test_scenario_b_resolves_with_quote() {
    let config = Config::default();
    let flow = AddressFlow::new(MemoryLookup, &config);
    let mut session = FunnelSession::new(&config);
    assert_ok!(session.apply(intro("Maria Silva", "maria@example.com")));
    answer_all(&mut session);

    assert_ok!(session.apply(Intent::EditPostalCode("01310-100".to_string())));
    let submitted_on = Local::now().date_naive();
    let Effect::StartVerification(postal_code) =
        assert_ok!(session.apply(Intent::SubmitPostalCode))
    else {
        panic!("应开始校验");
    };

    let start = Instant::now();
    assert_ok!(flow.resolve(&mut session, &postal_code).await);
    assert!(start.elapsed() >= Duration::from_millis(1500));

    let Some(AddressPhase::Resolved { address, quote, .. }) = session.address_phase() else {
        panic!("应处于 Resolved: {}", session.screen_name());
    };
    assert!(!address.city.is_empty());
    assert!(!address.region.is_empty());
    assert_eq!(quote.fee, Decimal::new(1990, 2));
    assert!((2..=5).contains(&quote.stock_count));

    let expected = submitted_on
        .checked_add_days(Days::new(3))
        .unwrap()
        .format("%d/%m/%Y")
        .to_string();
    assert_eq!(quote.delivery_date_display(), expected);
}

/// 场景 B（真实 ViaCEP）
#[tokio::test]
#[ignore] // 需要网络：cargo test -- --ignored
async fn test_scenario_b_live_viacep() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::from_env();
    let flow = AddressFlow::new(ViaCepClient::new(&config), &config);
    let mut session = FunnelSession::new(&config);
    assert_ok!(session.apply(intro("Maria Silva", "maria@example.com")));
    answer_all(&mut session);
    assert_ok!(session.apply(Intent::EditPostalCode("01310-100".to_string())));

    let Effect::StartVerification(postal_code) =
        assert_ok!(session.apply(Intent::SubmitPostalCode))
    else {
        panic!("应开始校验");
    };
    assert_ok!(flow.resolve(&mut session, &postal_code).await);

    assert_eq!(session.screen_name(), "address_resolved");
}

/// 场景 C：不存在的 CEP 回到 Idle，输入保留
#[tokio::test(start_paused = true)]
async fn test_scenario_c_not_found_preserves_input() {
    let config = Config::default();
    let flow = AddressFlow::new(MemoryLookup, &config);
    let mut session = FunnelSession::new(&config);
    assert_ok!(session.apply(intro("Maria Silva", "maria@example.com")));
    answer_all(&mut session);

    assert_ok!(session.apply(Intent::EditPostalCode("00000-000".to_string())));
    let Effect::StartVerification(postal_code) =
        assert_ok!(session.apply(Intent::SubmitPostalCode))
    else {
        panic!("应开始校验");
    };

    let start = Instant::now();
    assert_ok!(flow.resolve(&mut session, &postal_code).await);
    assert!(start.elapsed() >= Duration::from_millis(1500));

    assert_eq!(
        session.address_phase(),
        Some(&AddressPhase::Idle {
            input: "00000-000".to_string(),
            not_found: true
        })
    );

    // 可以修改后重试
    assert_ok!(session.apply(Intent::EditPostalCode("01310100".to_string())));
    assert_ok!(session.apply(Intent::SubmitPostalCode));
    assert_eq!(session.screen_name(), "address_verifying");
}

/// 场景 D：非法邮箱被拒绝
#[test]
fn test_scenario_d_bad_email_stays_on_intro() {
    let mut session = FunnelSession::new(&Config::default());
    let err = assert_err!(session.apply(intro("Maria Silva", "not-an-email")));
    assert!(matches!(err, FunnelError::Intro(_)));
    assert_eq!(session.screen_name(), "intro");
    assert!(session.visitor().is_none());
}

/// 完整终端会话：表单 → 问卷 → CEP（先失败再成功）→ 跳转
#[tokio::test(start_paused = true)]
async fn test_terminal_session_end_to_end() {
    let config = Config::default();
    let mut app = App::with_lookup(&config, MemoryLookup);

    let input: &[u8] = b"Maria Silva\nnot-an-email\nMaria Silva\nmaria@example.com\n\
        \n1\n\n2\n\n3\n\n4\n\n1\n\n1\n\n\
        123\n00000000\n01310-100\n\n";
    let mut out = Vec::new();

    let url = app.run_with(input, &mut out).await.unwrap();

    assert_eq!(url.as_deref(), Some(config.payment_url.as_str()));
    assert_eq!(app.session().screen(), &Screen::Redirected);
    assert_eq!(app.session().answers().len(), 6);
    assert_eq!(app.session().answers().get(1), Some("Excelente"));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Por favor, informe um e-mail válido."));
    assert!(text.contains("Por favor, selecione uma opção para continuar."));
    assert!(text.contains("Por favor, digite um CEP válido."));
    assert!(text.contains("CEP não encontrado"));
    assert!(text.contains("Frete único: R$ 19.90"));
    assert!(text.contains("Redirecionando para o pagamento"));
}

/// 输入提前结束时不跳转
#[tokio::test]
async fn test_terminal_session_ends_early() {
    let mut app = App::with_lookup(&Config::default(), MemoryLookup);
    let input: &[u8] = b"Maria\nmaria@example.com\n2\n";
    let mut out = Vec::new();

    let url = app.run_with(input, &mut out).await.unwrap();

    assert_eq!(url, None);
    assert_eq!(app.session().current_step(), Some(1));
    assert_eq!(app.session().selected_option(), Some("Boa"));
}
