//! Binding for the on-chain reports contract.

use serde_json::json;
use serde_json::Value;
use sha3::Digest;
use sha3::Keccak256;

use crate::ether_amount::EtherAmount;
use crate::timer;
use crate::wallet::parse_quantity;
use crate::wallet::Signer;
use crate::wallet::WalletError;
use crate::wallet::WalletProvider;

/// One function of a contract interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    pub payable: bool,
}

impl FunctionDescriptor {
    /// Canonical signature, e.g. `verifyReport(uint256,uint256)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    /// First four bytes of the Keccak-256 hash of the signature.
    pub fn selector(&self) -> [u8; 4] {
        let hash = Keccak256::digest(self.signature().as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash[..4]);
        selector
    }
}

/// `verifyReport(uint256 reportId, uint256 reward)`, payable.
pub const VERIFY_REPORT: FunctionDescriptor = FunctionDescriptor {
    name: "verifyReport",
    inputs: &["uint256", "uint256"],
    payable: true,
};

/// The part of the contract interface the panel calls.
pub const REPORTS_INTERFACE: &[FunctionDescriptor] = &[VERIFY_REPORT];

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// ABI-encoded calldata: the selector followed by one 32-byte word per argument.
pub fn encode_call(function: &FunctionDescriptor, args: &[[u8; 32]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * 32);
    data.extend_from_slice(&function.selector());
    for word in args {
        data.extend_from_slice(word);
    }
    data
}

/// A handle to the deployed contract, bound to the signer that pays for calls.
#[derive(Clone, Debug)]
pub struct ReportsContract<P> {
    address: String,
    interface: &'static [FunctionDescriptor],
    signer: Signer<P>,
}

impl<P: WalletProvider> ReportsContract<P> {
    pub fn new(
        address: impl Into<String>,
        interface: &'static [FunctionDescriptor],
        signer: Signer<P>,
    ) -> Self {
        Self {
            address: address.into(),
            interface,
            signer,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn signer(&self) -> &Signer<P> {
        &self.signer
    }

    fn function(&self, name: &str) -> Result<&'static FunctionDescriptor, WalletError> {
        self.interface
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| WalletError::UnknownFunction(name.to_string()))
    }

    /// Sends a transaction calling `function` with `args`, attaching `value`.
    ///
    /// Returns as soon as the wallet has broadcast the transaction.
    async fn send(
        &self,
        function: &FunctionDescriptor,
        args: &[[u8; 32]],
        value: EtherAmount,
    ) -> Result<PendingTransaction<'_, P>, WalletError> {
        if value.as_wei() != 0 && !function.payable {
            return Err(WalletError::NotPayable(function.signature()));
        }

        let tx = json!({
            "from": self.signer.address(),
            "to": self.address,
            "data": format!("0x{}", hex::encode(encode_call(function, args))),
            "value": value.to_hex_quantity(),
        });

        const METHOD: &str = "eth_sendTransaction";
        let response = self.signer.provider().request(METHOD, json!([tx])).await?;
        let hash = response
            .as_str()
            .ok_or_else(|| WalletError::unexpected(METHOD, &response))?
            .to_string();

        dioxus_logger::tracing::info!("{} sent as {hash}", function.signature());

        Ok(PendingTransaction {
            provider: self.signer.provider(),
            hash,
        })
    }

    /// Sends `verifyReport(report_id, reward)` with `reward` attached as value.
    pub async fn verify_report(
        &self,
        report_id: u64,
        reward: EtherAmount,
    ) -> Result<PendingTransaction<'_, P>, WalletError> {
        let function = self.function(VERIFY_REPORT.name)?;
        self.send(function, &[u64_word(report_id), reward.to_abi_word()], reward)
            .await
    }
}

/// What the chain reports about an included transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: String,
    pub block_number: u64,
    pub succeeded: bool,
}

impl TxReceipt {
    fn from_json(hash: &str, receipt: &Value) -> Result<Self, WalletError> {
        const METHOD: &str = "eth_getTransactionReceipt";
        let block_number = parse_quantity(&receipt["blockNumber"])
            .ok_or_else(|| WalletError::unexpected(METHOD, receipt))?;
        // pre-byzantium receipts carry no status.
        let succeeded = parse_quantity(&receipt["status"]).map_or(true, |s| s == 1);
        Ok(Self {
            hash: hash.to_string(),
            block_number,
            succeeded,
        })
    }
}

/// A broadcast transaction that may not be mined yet.
#[derive(Debug)]
pub struct PendingTransaction<'a, P> {
    provider: &'a P,
    hash: String,
}

impl<P: WalletProvider> PendingTransaction<'_, P> {
    /// Polls until the transaction has `confirmations` confirmations.
    ///
    /// There is no timeout: a transaction that is never mined keeps this
    /// future pending. A reverted transaction is an error.
    pub async fn wait(
        self,
        confirmations: u64,
        poll_interval: std::time::Duration,
    ) -> Result<TxReceipt, WalletError> {
        let receipt = loop {
            let response = self
                .provider
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await?;
            if !response.is_null() {
                break TxReceipt::from_json(&self.hash, &response)?;
            }
            timer::sleep(poll_interval).await;
        };

        if !receipt.succeeded {
            return Err(WalletError::Reverted(receipt.hash));
        }

        while confirmations > 1 {
            const METHOD: &str = "eth_blockNumber";
            let response = self.provider.request(METHOD, json!([])).await?;
            let head = parse_quantity(&response)
                .ok_or_else(|| WalletError::unexpected(METHOD, &response))?;
            if head.saturating_sub(receipt.block_number) + 1 >= confirmations {
                break;
            }
            timer::sleep(poll_interval).await;
        }

        Ok(receipt)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;

    /// Replays canned responses per method and records every request.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct MockProvider {
        responses: Rc<RefCell<Vec<(String, VecDeque<Result<Value, WalletError>>)>>>,
        pub(crate) calls: Rc<RefCell<Vec<(String, Value)>>>,
    }

    impl MockProvider {
        pub(crate) fn respond(&self, method: &str, response: Result<Value, WalletError>) {
            let mut responses = self.responses.borrow_mut();
            match responses.iter_mut().find(|(m, _)| m == method) {
                Some((_, queue)) => queue.push_back(response),
                None => responses.push((method.to_string(), VecDeque::from([response]))),
            }
        }

        pub(crate) fn calls_to(&self, method: &str) -> Vec<Value> {
            self.calls
                .borrow()
                .iter()
                .filter(|(m, _)| m == method)
                .map(|(_, params)| params.clone())
                .collect()
        }
    }

    impl WalletProvider for MockProvider {
        async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
            self.calls.borrow_mut().push((method.to_string(), params));
            let mut responses = self.responses.borrow_mut();
            let queue = responses
                .iter_mut()
                .find(|(m, _)| m == method)
                .map(|(_, q)| q)
                .unwrap_or_else(|| panic!("no response queued for {method}"));
            // the last response repeats so polling loops can be scripted briefly.
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }
    }

    const FROM: &str = "0x00000000000000000000000000000000000000aa";
    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const HASH: &str = "0xfeed";

    fn contract(provider: &MockProvider) -> ReportsContract<MockProvider> {
        ReportsContract::new(CONTRACT, REPORTS_INTERFACE, Signer::new(provider.clone(), FROM))
    }

    fn mined(status: &str, block: &str) -> Value {
        json!({ "transactionHash": HASH, "blockNumber": block, "status": status })
    }

    #[test]
    fn verify_report_selector_matches_signature() {
        assert_eq!(VERIFY_REPORT.signature(), "verifyReport(uint256,uint256)");
        let expected = Keccak256::digest(b"verifyReport(uint256,uint256)");
        assert_eq!(VERIFY_REPORT.selector(), expected[..4]);
        assert!(REPORTS_INTERFACE.contains(&VERIFY_REPORT));
        assert!(VERIFY_REPORT.payable);
    }

    #[test]
    fn calldata_is_selector_then_two_words() {
        let data = encode_call(
            &VERIFY_REPORT,
            &[u64_word(7), EtherAmount::from_wei(0x0de0).to_abi_word()],
        );
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(data[..4], VERIFY_REPORT.selector());
        assert!(data[4..35].iter().all(|b| *b == 0));
        assert_eq!(data[35], 7);
        assert!(data[36..66].iter().all(|b| *b == 0));
        assert_eq!(&data[66..], &[0x0d, 0xe0]);
    }

    #[tokio::test]
    async fn sends_amount_as_argument_and_value() {
        let provider = MockProvider::default();
        provider.respond("eth_sendTransaction", Ok(json!(HASH)));

        let reward = EtherAmount::from_ether_str("0.5").unwrap();
        let contract = contract(&provider);
        contract.verify_report(3, reward).await.unwrap();

        let sent = provider.calls_to("eth_sendTransaction");
        assert_eq!(sent.len(), 1);
        let tx = &sent[0][0];
        assert_eq!(tx["from"], FROM);
        assert_eq!(tx["to"], CONTRACT);
        assert_eq!(tx["value"], "0x6f05b59d3b20000");
        assert_eq!(
            tx["data"],
            format!(
                "0x{}",
                hex::encode(encode_call(&VERIFY_REPORT, &[u64_word(3), reward.to_abi_word()]))
            )
        );
    }

    #[tokio::test]
    async fn wait_polls_until_receipt_appears() {
        let provider = MockProvider::default();
        provider.respond("eth_sendTransaction", Ok(json!(HASH)));
        provider.respond("eth_getTransactionReceipt", Ok(Value::Null));
        provider.respond("eth_getTransactionReceipt", Ok(Value::Null));
        provider.respond("eth_getTransactionReceipt", Ok(mined("0x1", "0x10")));

        let contract = contract(&provider);
        let pending = contract
            .verify_report(1, EtherAmount::from_wei(1))
            .await
            .unwrap();
        let receipt = pending.wait(1, Duration::from_millis(1)).await.unwrap();

        assert_eq!(receipt.block_number, 16);
        assert!(receipt.succeeded);
        assert_eq!(provider.calls_to("eth_getTransactionReceipt").len(), 3);
        assert!(provider.calls_to("eth_blockNumber").is_empty());
    }

    #[tokio::test]
    async fn reverted_receipt_is_an_error() {
        let provider = MockProvider::default();
        provider.respond("eth_sendTransaction", Ok(json!(HASH)));
        provider.respond("eth_getTransactionReceipt", Ok(mined("0x0", "0x10")));

        let contract = contract(&provider);
        let pending = contract
            .verify_report(1, EtherAmount::from_wei(1))
            .await
            .unwrap();
        let err = pending.wait(1, Duration::from_millis(1)).await.unwrap_err();
        assert_eq!(err, WalletError::Reverted(HASH.to_string()));
    }

    #[tokio::test]
    async fn waits_for_extra_confirmations() {
        let provider = MockProvider::default();
        provider.respond("eth_sendTransaction", Ok(json!(HASH)));
        provider.respond("eth_getTransactionReceipt", Ok(mined("0x1", "0x10")));
        provider.respond("eth_blockNumber", Ok(json!("0x10")));
        provider.respond("eth_blockNumber", Ok(json!("0x11")));
        provider.respond("eth_blockNumber", Ok(json!("0x12")));

        let contract = contract(&provider);
        let pending = contract
            .verify_report(1, EtherAmount::from_wei(1))
            .await
            .unwrap();
        pending.wait(3, Duration::from_millis(1)).await.unwrap();

        assert_eq!(provider.calls_to("eth_blockNumber").len(), 3);
    }

    #[tokio::test]
    async fn wallet_rejection_surfaces_as_rpc_error() {
        let provider = MockProvider::default();
        provider.respond(
            "eth_sendTransaction",
            Err(WalletError::Rpc {
                code: 4001,
                message: "User denied transaction signature.".to_string(),
            }),
        );

        let err = contract(&provider)
            .verify_report(1, EtherAmount::from_wei(1))
            .await
            .unwrap_err();
        assert!(err.is_user_rejection());
    }

    #[tokio::test]
    async fn missing_function_is_never_sent() {
        let provider = MockProvider::default();
        let contract = ReportsContract::new(CONTRACT, &[], Signer::new(provider.clone(), FROM));

        let err = contract
            .verify_report(1, EtherAmount::from_wei(1))
            .await
            .unwrap_err();
        assert_eq!(err, WalletError::UnknownFunction("verifyReport".to_string()));
        assert!(provider.calls_to("eth_sendTransaction").is_empty());
    }

    #[tokio::test]
    async fn value_needs_a_payable_function() {
        const VIEW_ONLY: &[FunctionDescriptor] = &[FunctionDescriptor {
            payable: false,
            ..VERIFY_REPORT
        }];
        let provider = MockProvider::default();
        let contract = ReportsContract::new(CONTRACT, VIEW_ONLY, Signer::new(provider.clone(), FROM));

        let err = contract
            .verify_report(1, EtherAmount::from_wei(1))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            WalletError::NotPayable("verifyReport(uint256,uint256)".to_string())
        );
        assert!(provider.calls_to("eth_sendTransaction").is_empty());
    }
}
